//! Wavefront OBJ parsing.
//!
//! [`ObjData`] holds the raw attribute lists of an OBJ file together with its triangulated faces.
//! Turning it into something the GPU can draw is the job of [`crate::mesh::MeshData`].

use std::{
    fmt,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
    str::SplitWhitespace,
};

use glam::{Vec2, Vec3};

/// One corner of a face, as 0-based indices into the attribute lists of an [`ObjData`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FaceCorner {
    pub position: usize,
    pub texcoord: Option<usize>,
    pub normal: Option<usize>,
}

/// A triangle, along with the line of the file it was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    pub corners: [FaceCorner; 3],
    pub line: usize,
}

/// The contents of an OBJ file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjData {
    pub positions: Vec<Vec3>,
    pub texcoords: Vec<Vec2>,
    pub normals: Vec<Vec3>,
    pub faces: Vec<Face>,
}

/// What went wrong while reading an OBJ file.
#[derive(Debug)]
pub enum ObjErrorKind {
    Io(std::io::Error),
    InvalidNumber(String),
    MissingComponent(&'static str),
    InvalidCorner(String),
    DegenerateFace(usize),
    ZeroIndex,
    IndexOutOfRange {
        attribute: &'static str,
        index: i64,
        count: usize,
    },
}

/// An error produced while reading an OBJ file. `line` is 1-based, `0` means the error is not
/// tied to a line (e.g. the file could not be opened).
#[derive(Debug)]
pub struct ObjError {
    pub line: usize,
    pub kind: ObjErrorKind,
}

impl ObjError {
    pub(crate) fn new(line: usize, kind: ObjErrorKind) -> Self {
        Self { line, kind }
    }
}

impl fmt::Display for ObjErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjErrorKind::Io(err) => write!(f, "I/O error: {err}"),
            ObjErrorKind::InvalidNumber(value) => write!(f, "invalid number `{value}`"),
            ObjErrorKind::MissingComponent(what) => write!(f, "missing {what}"),
            ObjErrorKind::InvalidCorner(corner) => write!(f, "invalid face corner `{corner}`"),
            ObjErrorKind::DegenerateFace(count) => {
                write!(f, "face has {count} corners, at least 3 are required")
            }
            ObjErrorKind::ZeroIndex => write!(f, "OBJ indices start at 1, found 0"),
            ObjErrorKind::IndexOutOfRange {
                attribute,
                index,
                count,
            } => write!(
                f,
                "{attribute} index {index} out of range ({count} defined)"
            ),
        }
    }
}

impl fmt::Display for ObjError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line == 0 {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "line {}: {}", self.line, self.kind)
        }
    }
}

impl std::error::Error for ObjError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ObjErrorKind::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl ObjData {
    /// Parses OBJ data from a string.
    pub fn parse(source: &str) -> Result<Self, ObjError> {
        Self::from_reader(source.as_bytes())
    }

    /// Reads and parses the OBJ file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ObjError> {
        let file = File::open(path.as_ref())
            .map_err(|e| ObjError::new(0, ObjErrorKind::Io(e)))?;
        Self::from_reader(BufReader::new(file))
    }

    /// Parses OBJ data line by line from `reader`.
    pub fn from_reader(reader: impl BufRead) -> Result<Self, ObjError> {
        let mut obj = ObjData::default();

        for (number, line) in reader.lines().enumerate() {
            let number = number + 1;
            let line = line.map_err(|e| ObjError::new(number, ObjErrorKind::Io(e)))?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut parts = line.split_whitespace();
            let Some(directive) = parts.next() else {
                continue;
            };

            match directive {
                "v" => {
                    let [x, y, z] = parse_floats::<3>(&mut parts, "vertex coordinate", number)?;
                    obj.positions.push(Vec3::new(x, y, z));
                }
                "vt" => {
                    let [u, v] = parse_floats::<2>(&mut parts, "texture coordinate", number)?;
                    obj.texcoords.push(Vec2::new(u, v));
                }
                "vn" => {
                    let [x, y, z] = parse_floats::<3>(&mut parts, "normal component", number)?;
                    obj.normals.push(Vec3::new(x, y, z));
                }
                "f" => {
                    let corners = parts
                        .map(|corner| obj.parse_corner(corner, number))
                        .collect::<Result<Vec<_>, _>>()?;
                    if corners.len() < 3 {
                        return Err(ObjError::new(
                            number,
                            ObjErrorKind::DegenerateFace(corners.len()),
                        ));
                    }
                    // Fan triangulation, a no-op for triangles.
                    for i in 1..corners.len() - 1 {
                        obj.faces.push(Face {
                            corners: [corners[0], corners[i], corners[i + 1]],
                            line: number,
                        });
                    }
                }
                other => log::trace!("Skipping `{other}` on line {number}"),
            }
        }

        log::debug!(
            "Parsed OBJ: {} positions, {} texcoords, {} normals, {} triangles",
            obj.positions.len(),
            obj.texcoords.len(),
            obj.normals.len(),
            obj.faces.len()
        );

        Ok(obj)
    }

    /// Parses a face corner of the form `p`, `p/t`, `p//n` or `p/t/n`.
    fn parse_corner(&self, corner: &str, line: usize) -> Result<FaceCorner, ObjError> {
        let invalid = || ObjError::new(line, ObjErrorKind::InvalidCorner(corner.to_string()));
        let mut fields = corner.split('/');
        let position = match fields.next() {
            Some(field) if !field.is_empty() => {
                parse_index(field, self.positions.len(), "position", line)?
            }
            _ => return Err(invalid()),
        };
        let texcoord = match fields.next() {
            Some(field) if !field.is_empty() => {
                Some(parse_index(field, self.texcoords.len(), "texcoord", line)?)
            }
            _ => None,
        };
        let normal = match fields.next() {
            Some(field) if !field.is_empty() => {
                Some(parse_index(field, self.normals.len(), "normal", line)?)
            }
            _ => None,
        };
        if fields.next().is_some() {
            return Err(invalid());
        }

        Ok(FaceCorner {
            position,
            texcoord,
            normal,
        })
    }
}

/// Parses exactly `N` leading floats, ignoring any trailing components such as `w`.
fn parse_floats<const N: usize>(
    parts: &mut SplitWhitespace<'_>,
    what: &'static str,
    line: usize,
) -> Result<[f32; N], ObjError> {
    let mut values = [0.0; N];
    for value in values.iter_mut() {
        let part = parts
            .next()
            .ok_or_else(|| ObjError::new(line, ObjErrorKind::MissingComponent(what)))?;
        *value = part
            .parse()
            .map_err(|_| ObjError::new(line, ObjErrorKind::InvalidNumber(part.to_string())))?;
    }
    Ok(values)
}

/// Converts a 1-based (or negative, relative) OBJ index into a 0-based one.
///
/// Positive indices are only range-checked once the whole file is known, negative ones are
/// resolved against the `count` entries read so far.
fn parse_index(
    field: &str,
    count: usize,
    attribute: &'static str,
    line: usize,
) -> Result<usize, ObjError> {
    let index: i64 = field
        .parse()
        .map_err(|_| ObjError::new(line, ObjErrorKind::InvalidNumber(field.to_string())))?;
    match index {
        0 => Err(ObjError::new(line, ObjErrorKind::ZeroIndex)),
        i if i > 0 => Ok((i - 1) as usize),
        i => {
            let resolved = count as i64 + i;
            if resolved < 0 {
                Err(ObjError::new(
                    line,
                    ObjErrorKind::IndexOutOfRange {
                        attribute,
                        index: i,
                        count,
                    },
                ))
            } else {
                Ok(resolved as usize)
            }
        }
    }
}
