/// OBJ mesh decoder: raw attribute streams, vertex welding, indexed output
///
/// Supports the triangulated `p/t/n` subset of the Wavefront OBJ format:
/// `v`, `vn`, `vt` attribute records and `f` face records with exactly three
/// slash-separated vertex references. Any other record kind is ignored.
///
/// Face references that share the same `(position, texcoord, normal)` index
/// triple are welded into a single output vertex; any component difference
/// produces a distinct vertex even when the referenced values are equal.
use std::collections::HashMap;
use std::io::BufRead;

use log::debug;
use nom::{
    character::complete::{char as char_token, multispace0, multispace1, u32 as index_literal},
    combinator::all_consuming,
    IResult,
};

use crate::error::ObjError;
use crate::geometry::IndexedMesh;

/// One `p/t/n` vertex slot of a face record, 1-based indices.
///
/// Doubles as the welding key: exact triple equality, nothing value-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct FaceRef {
    position: u32,
    tex_coord: u32,
    normal: u32,
}

/// Parse an OBJ source from a buffered reader in a single forward pass.
///
/// Declarations must precede the faces that reference them (standard OBJ
/// convention). Any failure aborts the parse; no partial mesh is returned.
pub fn parse_obj<R: BufRead>(reader: R) -> Result<IndexedMesh, ObjError> {
    let mut builder = ObjBuilder::new();
    for (number, line) in reader.lines().enumerate() {
        builder.record(&line?, number + 1)?;
    }
    Ok(builder.finish())
}

/// Parse an OBJ source already held in memory.
pub fn parse_obj_str(source: &str) -> Result<IndexedMesh, ObjError> {
    let mut builder = ObjBuilder::new();
    for (number, line) in source.lines().enumerate() {
        builder.record(line, number + 1)?;
    }
    Ok(builder.finish())
}

/// Working state of one parse: raw attribute streams in file order plus the
/// welding map. Dropped once the mesh is extracted.
struct ObjBuilder {
    raw_positions: Vec<f32>,
    raw_tex_coords: Vec<f32>,
    raw_normals: Vec<f32>,
    welded: HashMap<FaceRef, u32>,
    mesh: IndexedMesh,
}

impl ObjBuilder {
    fn new() -> Self {
        // Each raw stream is seeded with one placeholder group so the
        // format's 1-based references map to offsets without adjustment;
        // logical index 0 stays reserved.
        Self {
            raw_positions: vec![0.0; 3],
            raw_tex_coords: vec![0.0; 2],
            raw_normals: vec![0.0; 3],
            welded: HashMap::new(),
            mesh: IndexedMesh::new(),
        }
    }

    /// Classify and consume one input line.
    fn record(&mut self, line: &str, line_no: usize) -> Result<(), ObjError> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(());
        }
        let (keyword, body) = match trimmed.split_once(char::is_whitespace) {
            Some((keyword, body)) => (keyword, body),
            None => (trimmed, ""),
        };

        match keyword {
            "v" => {
                let xyz = floats3(body, line_no, "v")?;
                self.raw_positions.extend_from_slice(&xyz);
            }
            "vn" => {
                let xyz = floats3(body, line_no, "vn")?;
                self.raw_normals.extend_from_slice(&xyz);
            }
            "vt" => {
                let uv = floats2(body, line_no, "vt")?;
                self.raw_tex_coords.extend_from_slice(&uv);
            }
            "f" => self.face(body, line_no)?,
            // Comments, groups, materials and other records are tolerated
            _ => {}
        }
        Ok(())
    }

    /// Process one triangular face record.
    fn face(&mut self, body: &str, line_no: usize) -> Result<(), ObjError> {
        let slots: Vec<&str> = body.split_whitespace().collect();
        if slots.len() != 3 {
            return Err(ObjError::FaceArity {
                line: line_no,
                count: slots.len(),
            });
        }
        for slot in slots {
            let reference = match all_consuming(face_ref)(slot) {
                Ok((_, reference)) => reference,
                Err(_) => {
                    return Err(ObjError::Parse {
                        line: line_no,
                        record: "f",
                    })
                }
            };
            let compact = self.weld(reference, line_no)?;
            self.mesh.indices.push(compact);
        }
        Ok(())
    }

    /// Resolve a face reference to its compact index, appending one element
    /// group to each output buffer the first time the key is seen.
    fn weld(&mut self, reference: FaceRef, line_no: usize) -> Result<u32, ObjError> {
        if let Some(&compact) = self.welded.get(&reference) {
            return Ok(compact);
        }

        let p = stream_offset(&self.raw_positions, 3, reference.position, "position", line_no)?;
        let t = stream_offset(
            &self.raw_tex_coords,
            2,
            reference.tex_coord,
            "texture coordinate",
            line_no,
        )?;
        let n = stream_offset(&self.raw_normals, 3, reference.normal, "normal", line_no)?;

        let compact = (self.mesh.positions.len() / 3) as u32;
        self.mesh
            .positions
            .extend_from_slice(&self.raw_positions[p..p + 3]);
        self.mesh
            .tex_coords
            .extend_from_slice(&self.raw_tex_coords[t..t + 2]);
        self.mesh
            .normals
            .extend_from_slice(&self.raw_normals[n..n + 3]);
        self.welded.insert(reference, compact);
        Ok(compact)
    }

    fn finish(self) -> IndexedMesh {
        debug!(
            "parsed {} positions, {} normals, {} texture coordinates",
            self.raw_positions.len() / 3 - 1,
            self.raw_normals.len() / 3 - 1,
            self.raw_tex_coords.len() / 2 - 1,
        );
        debug!(
            "welded into {} vertices, {} indices",
            self.mesh.vertex_count(),
            self.mesh.indices.len(),
        );
        self.mesh
    }
}

/// Bounds-check a 1-based reference into a raw stream, returning the flat
/// offset of its element group. Index 0 only addresses the reserved
/// placeholder and is always out of range.
fn stream_offset(
    stream: &[f32],
    stride: usize,
    index: u32,
    attribute: &'static str,
    line: usize,
) -> Result<usize, ObjError> {
    let start = index as usize * stride;
    if index == 0 || start + stride > stream.len() {
        return Err(ObjError::IndexOutOfRange {
            line,
            attribute,
            index,
            declared: stream.len() / stride - 1,
        });
    }
    Ok(start)
}

fn floats3(body: &str, line: usize, record: &'static str) -> Result<[f32; 3], ObjError> {
    match float3(body) {
        Ok((_, xyz)) => Ok(xyz),
        Err(_) => Err(ObjError::Parse { line, record }),
    }
}

fn floats2(body: &str, line: usize, record: &'static str) -> Result<[f32; 2], ObjError> {
    match float2(body) {
        Ok((_, uv)) => Ok(uv),
        Err(_) => Err(ObjError::Parse { line, record }),
    }
}

fn float3(input: &str) -> IResult<&str, [f32; 3]> {
    let (input, _) = multispace0(input)?;
    let (input, x) = nom::number::complete::float(input)?;
    let (input, _) = multispace1(input)?;
    let (input, y) = nom::number::complete::float(input)?;
    let (input, _) = multispace1(input)?;
    let (input, z) = nom::number::complete::float(input)?;
    Ok((input, [x, y, z]))
}

fn float2(input: &str) -> IResult<&str, [f32; 2]> {
    let (input, _) = multispace0(input)?;
    let (input, u) = nom::number::complete::float(input)?;
    let (input, _) = multispace1(input)?;
    let (input, v) = nom::number::complete::float(input)?;
    Ok((input, [u, v]))
}

fn face_ref(input: &str) -> IResult<&str, FaceRef> {
    let (input, position) = index_literal(input)?;
    let (input, _) = char_token('/')(input)?;
    let (input, tex_coord) = index_literal(input)?;
    let (input, _) = char_token('/')(input)?;
    let (input, normal) = index_literal(input)?;
    Ok((
        input,
        FaceRef {
            position,
            tex_coord,
            normal,
        },
    ))
}
