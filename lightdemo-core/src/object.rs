//! Objects placed in the scene.

use glam::{Mat4, Vec3};

/// A mesh placed in 3D space with a position, orientation, scale and pivot point.
///
/// The orientation holds rotation angles in radians around the X, Y and Z axes. Rotation and
/// scaling happen around the pivot (`center`) given in mesh space. The model matrix is rebuilt
/// after every mutation, so reading it is free.
#[derive(Debug, Clone)]
pub struct Object3D<M> {
    mesh: M,
    position: Vec3,
    orientation: Vec3,
    scale: Vec3,
    center: Vec3,
    model_matrix: Mat4,
}

impl<M> Object3D<M> {
    /// Creates an object at the origin with no rotation and unit scale.
    pub fn new(mesh: M) -> Self {
        Self::with_transform(mesh, Vec3::ZERO, Vec3::ZERO, Vec3::ONE, Vec3::ZERO)
    }

    pub fn with_transform(
        mesh: M,
        position: Vec3,
        orientation: Vec3,
        scale: Vec3,
        center: Vec3,
    ) -> Self {
        let mut object = Self {
            mesh,
            position,
            orientation,
            scale,
            center,
            model_matrix: Mat4::IDENTITY,
        };
        object.refresh_model_matrix();
        object
    }

    /// Moves the object along the given vector.
    pub fn move_by(&mut self, offset: Vec3) {
        self.position += offset;
        self.refresh_model_matrix();
    }

    /// Adds the given angles to the object's current orientation.
    pub fn rotate(&mut self, angles: Vec3) {
        self.orientation += angles;
        self.refresh_model_matrix();
    }

    /// Multiplies the object's current scale by the given factors.
    pub fn grow(&mut self, factors: Vec3) {
        self.scale *= factors;
        self.refresh_model_matrix();
    }

    /// Sets the pivot point used for rotation and scaling.
    pub fn center_point(&mut self, center: Vec3) {
        self.center = center;
        self.refresh_model_matrix();
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn orientation(&self) -> Vec3 {
        self.orientation
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn mesh(&self) -> &M {
        &self.mesh
    }

    /// The object's current model transformation matrix.
    pub fn model_matrix(&self) -> Mat4 {
        self.model_matrix
    }

    fn refresh_model_matrix(&mut self) {
        self.model_matrix = Mat4::from_translation(self.position)
            * Mat4::from_translation(self.center * self.scale)
            * Mat4::from_scale(self.scale)
            * Mat4::from_rotation_z(self.orientation.z)
            * Mat4::from_rotation_x(self.orientation.x)
            * Mat4::from_rotation_y(self.orientation.y)
            * Mat4::from_translation(-self.center);
    }
}
