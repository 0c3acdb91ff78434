//! Named shader uniform values.

use glam::{Mat4, Vec3, Vec4};
use indexmap::IndexMap;

/// A typed value for a shader uniform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Int(i32),
    Float(f32),
    Vec3(Vec3),
    Vec4(Vec4),
    Mat4(Mat4),
}

impl From<i32> for UniformValue {
    fn from(value: i32) -> Self {
        UniformValue::Int(value)
    }
}

impl From<f32> for UniformValue {
    fn from(value: f32) -> Self {
        UniformValue::Float(value)
    }
}

impl From<Vec3> for UniformValue {
    fn from(value: Vec3) -> Self {
        UniformValue::Vec3(value)
    }
}

impl From<Vec4> for UniformValue {
    fn from(value: Vec4) -> Self {
        UniformValue::Vec4(value)
    }
}

impl From<Mat4> for UniformValue {
    fn from(value: Mat4) -> Self {
        UniformValue::Mat4(value)
    }
}

/// Uniform values keyed by name, kept in the order they were first set.
///
/// Setting a name again replaces its value but keeps its position, so uploads happen in a
/// stable order.
#[derive(Debug, Clone, Default)]
pub struct UniformTable {
    values: IndexMap<String, UniformValue>,
}

impl UniformTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Saves a value to assign to the given uniform name.
    pub fn set(&mut self, name: &str, value: impl Into<UniformValue>) {
        let value = value.into();
        match self.values.get_mut(name) {
            Some(slot) => *slot = value,
            None => {
                self.values.insert(name.to_string(), value);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&UniformValue> {
        self.values.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &UniformValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_overwrites_in_place() {
        let mut table = UniformTable::new();
        table.set("ambientColor", Vec3::splat(0.1));
        table.set("pointPosition", Vec3::ZERO);
        table.set("model", Mat4::IDENTITY);
        table.set("pointPosition", Vec3::X);

        assert_eq!(table.len(), 3);
        assert_eq!(table.get("pointPosition"), Some(&UniformValue::Vec3(Vec3::X)));
        let names: Vec<&str> = table.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["ambientColor", "pointPosition", "model"]);
    }

    #[test]
    fn test_value_conversions() {
        let mut table = UniformTable::new();
        table.set("baseTexture", 0_i32);
        table.set("shininess", 32.0_f32);
        table.set("tint", Vec4::ONE);

        assert_eq!(table.get("baseTexture"), Some(&UniformValue::Int(0)));
        assert_eq!(table.get("shininess"), Some(&UniformValue::Float(32.0)));
        assert_eq!(table.get("tint"), Some(&UniformValue::Vec4(Vec4::ONE)));
        assert_eq!(table.get("missing"), None);
        assert!(!table.is_empty());
    }
}
