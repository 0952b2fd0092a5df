/// OV3D Terminal Viewer
///
/// Loads a triangulated OBJ file and renders it as shaded ASCII.
/// Controls:
///   - WASD / Arrow Keys: Rotate the mesh
///   - E/R: Roll rotation
///   - Q/ESC: Quit

use std::env;
use std::fs::File;
use std::io::{self, BufReader};

use log::info;
use ov3d_core::{obj, IndexedMesh};
use ov3d_terminal::TerminalApp;

fn main() -> io::Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mesh = match args.get(1) {
        Some(path) => load_mesh(path)?,
        None => {
            eprintln!("Usage: {} <obj-file>", args[0]);
            eprintln!("\nNo OBJ file provided, using default cube...");
            IndexedMesh::cube(2.0)
        }
    };

    info!(
        "mesh ready: {} vertices, {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count()
    );

    let mut app = TerminalApp::new(mesh)?;
    app.run()
}

fn load_mesh(path: &str) -> io::Result<IndexedMesh> {
    let file = File::open(path)?;
    obj::parse_obj(BufReader::new(file))
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))
}
