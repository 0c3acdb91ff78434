use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use lightdemo_core::{
    DemoState, MeshData, ObjData, Object3D,
    config::SceneConfig,
    controls::{Action, Role},
};

fn client_assets() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("assets")
}

#[test]
fn bundled_scene_loads() {
    let config = SceneConfig::load(&client_assets().join("scene.json")).unwrap();
    assert_eq!(config.objects.len(), 5);
    assert_eq!(config.roles.get(Role::Flyer), Some("bird"));
    assert_eq!(config.roles.get(Role::Turntable), Some("gem"));
    assert_eq!(config.roles.get(Role::Light), Some("light"));
    assert!(!config.object("light").unwrap().lit);
    assert!(config.resolve(&config.shader_dir).join("specular_light.frag").is_file());

    for object in &config.objects {
        let mesh = config.resolve(&object.mesh);
        assert!(mesh.is_file(), "{}", mesh.display());
        if let Some(texture) = &object.texture {
            let texture = config.resolve(texture);
            assert!(texture.is_file(), "{}", texture.display());
        }
    }
}

#[test]
fn bundled_meshes_split_shared_corners() {
    for (name, vertices, triangles) in [("cube.obj", 24, 12), ("octahedron.obj", 24, 8)] {
        let obj = ObjData::load(client_assets().join("models").join(name)).unwrap();
        assert_eq!(obj.faces.len(), triangles, "{name}");

        let mesh = MeshData::from_obj(&obj).unwrap();
        assert_eq!(mesh.vertices.len(), vertices, "{name}");
        assert_eq!(mesh.indices.len(), triangles * 3, "{name}");
        assert!(
            mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len()),
            "{name}"
        );
        assert!(
            mesh.vertices
                .iter()
                .all(|v| (v.normal.length() - 1.0).abs() < 1e-3),
            "{name}"
        );

        // Parsing the same file again yields the same buffers.
        let reparsed = ObjData::load(client_assets().join("models").join(name)).unwrap();
        let again = MeshData::from_obj(&reparsed).unwrap();
        assert_eq!(mesh, again, "{name}");
    }
}

#[test]
fn light_object_transform_from_scene() {
    let config = SceneConfig::load(&client_assets().join("scene.json")).unwrap();
    let light = config.object("light").unwrap();
    let object = Object3D::with_transform(
        (),
        light.position.into(),
        light.rotation.into(),
        light.scale.into(),
        light.center.into(),
    );
    // The pivot point itself lands on the object's position.
    let pivot = object.model_matrix().transform_point3(object.center());
    let expected = object.position() + object.center() * object.scale();
    assert!((pivot - expected).length() < 1e-4);
}

#[test]
fn bundled_scene_light_tints_sky() {
    let config = SceneConfig::load(&client_assets().join("scene.json")).unwrap();
    let mut state = DemoState::new(&config, 1.0, |_| Ok::<_, String>(())).unwrap();
    let light = config.object("light").unwrap();
    assert_eq!(state.point_position(), glam::Vec3::from(light.position));

    // The light starts at x = 0 and moves 0.1 per frame.
    let left = HashSet::from([Action::LightLeft]);
    for _ in 0..5 {
        state.step(&left, &HashSet::new());
    }
    let light_x = state.role_object(Role::Light).unwrap().position().x;
    assert!((light_x + 0.5).abs() < 1e-5);

    let tint = config.sky.as_ref().unwrap().tint;
    let sky = state.sky_color();
    assert!((sky.x - tint[0] * 0.5).abs() < 1e-5);
    assert!((sky.z - tint[2] * 0.5).abs() < 1e-5);
}
