//! Shader sources.
//!
//! Shaders are read from the scene's shader directory so they can be edited without rebuilding.
//! The copies bundled with the binary are used for any file missing from that directory.

use std::path::PathBuf;

use include_dir::{Dir, include_dir};

static BUNDLED: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/shaders");

pub const PERSPECTIVE_VERT: &str = "normal_perspective.vert";
pub const SPECULAR_FRAG: &str = "specular_light.frag";
pub const TEXTURE_FRAG: &str = "texture_mapped.frag";

/// Looks shader files up in a directory, then in the bundled copies.
pub struct ShaderSources {
    dir: PathBuf,
}

impl ShaderSources {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the source of the shader file `name`.
    pub fn read(&self, name: &str) -> Result<String, String> {
        let path = self.dir.join(name);
        match std::fs::read_to_string(&path) {
            Ok(source) => {
                log::debug!("Read shader '{}'", path.display());
                Ok(source)
            }
            Err(err) => {
                let source = bundled(name).ok_or_else(|| {
                    format!("Failed to read shader '{}': {}", path.display(), err)
                })?;
                log::warn!(
                    "Could not read shader '{}' ({}), using the bundled copy",
                    path.display(),
                    err
                );
                Ok(source.to_string())
            }
        }
    }
}

/// Returns the bundled source of the shader file `name`.
pub fn bundled(name: &str) -> Option<&'static str> {
    BUNDLED.get_file(name).and_then(|file| file.contents_utf8())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_shaders() {
        for name in [PERSPECTIVE_VERT, SPECULAR_FRAG, TEXTURE_FRAG] {
            let source = bundled(name).unwrap();
            assert!(source.starts_with("#version 330 core"), "{name}");
        }
        assert!(bundled("missing.frag").is_none());
    }

    #[test]
    fn test_read_from_directory() {
        let sources = ShaderSources::new(concat!(env!("CARGO_MANIFEST_DIR"), "/shaders"));
        let source = sources.read(SPECULAR_FRAG).unwrap();
        assert!(source.contains("uniform float shininess;"));
    }

    #[test]
    fn test_fallback_to_bundled() {
        let sources = ShaderSources::new("/nonexistent/shader/dir");
        let source = sources.read(TEXTURE_FRAG).unwrap();
        assert_eq!(source, bundled(TEXTURE_FRAG).unwrap());

        let err = sources.read("missing.frag").unwrap_err();
        let expected = "Failed to read shader '/nonexistent/shader/dir/missing.frag'";
        assert!(err.starts_with(expected));
    }
}
