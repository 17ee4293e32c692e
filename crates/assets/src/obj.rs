//! Wavefront OBJ import: positions, normals, texcoords, triangulated faces.

use crate::{AssetError, MeshAsset, MeshVertex};
use std::collections::HashMap;

/// Parse OBJ text into an interleaved mesh.
///
/// Supports `v`, `vn`, `vt` and `f` records with `v`, `v/vt`, `v//vn` and
/// `v/vt/vn` face references, including negative (relative) indices.
/// Faces with more than three corners are fan-triangulated. Missing
/// normals or texcoords default to zero.
pub fn parse_obj(path: &str, text: &str) -> Result<MeshAsset, AssetError> {
    let mut positions: Vec<[f32; 3]> = Vec::new();
    let mut normals: Vec<[f32; 3]> = Vec::new();
    let mut texcoords: Vec<[f32; 2]> = Vec::new();

    let mut vertices: Vec<MeshVertex> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();
    // Deduplicates identical position/texcoord/normal triplets.
    let mut seen: HashMap<(usize, Option<usize>, Option<usize>), u32> = HashMap::new();

    let malformed = |line: usize, reason: &str| AssetError::MalformedObj {
        path: path.to_string(),
        line,
        reason: reason.to_string(),
    };

    for (line_no, raw) in text.lines().enumerate() {
        let line_no = line_no + 1;
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let mut fields = line.split_whitespace();
        let keyword = fields.next().unwrap_or("");
        match keyword {
            "v" => positions.push(parse_floats::<3>(&mut fields).ok_or_else(|| {
                malformed(line_no, "vertex position needs three coordinates")
            })?),
            "vn" => normals.push(
                parse_floats::<3>(&mut fields)
                    .ok_or_else(|| malformed(line_no, "normal needs three coordinates"))?,
            ),
            "vt" => texcoords.push(
                parse_floats::<2>(&mut fields)
                    .ok_or_else(|| malformed(line_no, "texcoord needs two coordinates"))?,
            ),
            "f" => {
                let mut corners: Vec<u32> = Vec::new();
                for field in fields {
                    let key = parse_face_corner(
                        field,
                        positions.len(),
                        texcoords.len(),
                        normals.len(),
                    )
                    .ok_or_else(|| malformed(line_no, "bad face reference"))?;

                    let index = *seen.entry(key).or_insert_with(|| {
                        let (pi, ti, ni) = key;
                        vertices.push(MeshVertex {
                            position: positions[pi],
                            normal: ni.map(|i| normals[i]).unwrap_or([0.0; 3]),
                            texcoord: ti.map(|i| texcoords[i]).unwrap_or([0.0; 2]),
                        });
                        (vertices.len() - 1) as u32
                    });
                    corners.push(index);
                }
                if corners.len() < 3 {
                    return Err(malformed(line_no, "face needs at least three corners"));
                }
                for i in 1..corners.len() - 1 {
                    indices.extend([corners[0], corners[i], corners[i + 1]]);
                }
            }
            // Groups, materials, smoothing and the rest are ignored.
            _ => {}
        }
    }

    if positions.is_empty() {
        return Err(malformed(0, "no vertex positions"));
    }

    Ok(MeshAsset {
        name: path.to_string(),
        vertices,
        indices,
    })
}

fn parse_floats<'a, const N: usize>(
    fields: &mut impl Iterator<Item = &'a str>,
) -> Option<[f32; N]> {
    let mut out = [0.0f32; N];
    for slot in &mut out {
        *slot = fields.next()?.parse().ok()?;
    }
    Some(out)
}

/// Resolve one `f` corner into zero-based (position, texcoord, normal) indices.
fn parse_face_corner(
    field: &str,
    positions: usize,
    texcoords: usize,
    normals: usize,
) -> Option<(usize, Option<usize>, Option<usize>)> {
    let mut parts = field.split('/');
    let pi = resolve_index(parts.next()?, positions)?;
    let ti = match parts.next() {
        None | Some("") => None,
        Some(s) => Some(resolve_index(s, texcoords)?),
    };
    let ni = match parts.next() {
        None | Some("") => None,
        Some(s) => Some(resolve_index(s, normals)?),
    };
    Some((pi, ti, ni))
}

/// OBJ indices are one-based; negative values count back from the end.
fn resolve_index(s: &str, len: usize) -> Option<usize> {
    let value: i64 = s.parse().ok()?;
    let resolved = if value > 0 {
        value - 1
    } else if value < 0 {
        len as i64 + value
    } else {
        return None;
    };
    if (0..len as i64).contains(&resolved) {
        Some(resolved as usize)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_triangle_with_normals_and_texcoords() {
        let text = "\
v 0 0 0
v 1 0 0
v 0 1 0
vt 0 0
vt 1 0
vt 0 1
vn 0 0 1
f 1/1/1 2/2/1 3/3/1
";
        let mesh = parse_obj("tri.obj", text).unwrap();
        assert_eq!(mesh.vertices.len(), 3);
        assert_eq!(mesh.indices, vec![0, 1, 2]);
        assert_eq!(mesh.vertices[1].texcoord, [1.0, 0.0]);
        assert_eq!(mesh.vertices[2].normal, [0.0, 0.0, 1.0]);
    }

    #[test]
    fn quad_is_fan_triangulated() {
        let text = "\
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
f 1 2 3 4
";
        let mesh = parse_obj("quad.obj", text).unwrap();
        assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn shared_corners_are_deduplicated() {
        let text = "\
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
f 1 2 3
f 1 3 4
";
        let mesh = parse_obj("quad.obj", text).unwrap();
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices.len(), 6);
    }

    #[test]
    fn negative_indices_resolve_from_the_end() {
        let text = "\
v 0 0 0
v 1 0 0
v 0 1 0
f -3 -2 -1
";
        let mesh = parse_obj("tri.obj", text).unwrap();
        assert_eq!(mesh.indices, vec![0, 1, 2]);
    }

    #[test]
    fn out_of_range_index_is_malformed() {
        let text = "v 0 0 0\nf 1 2 3";
        let err = parse_obj("bad.obj", text).unwrap_err();
        assert!(matches!(err, AssetError::MalformedObj { line: 2, .. }));
    }

    #[test]
    fn comments_and_unknown_records_are_ignored() {
        let text = "\
# a comment
o object
v 0 0 0
v 1 0 0
v 0 1 0
s off
f 1 2 3 # trailing comment
";
        let mesh = parse_obj("tri.obj", text).unwrap();
        assert_eq!(mesh.indices, vec![0, 1, 2]);
    }
}
