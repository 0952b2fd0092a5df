/// Example: Load and render an OBJ file in the terminal
///
/// Usage: cargo run --example load_obj -- path/to/file.obj

use std::env;
use std::fs::File;
use std::io::{self, BufReader};

use ov3d_core::{obj, IndexedMesh};
use ov3d_terminal::TerminalApp;

fn main() -> io::Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <obj-file>", args[0]);
        eprintln!("\nNo OBJ file provided, using default cube...");
        let mut app = TerminalApp::new(IndexedMesh::cube(2.0))?;
        return app.run();
    }

    let obj_path = &args[1];
    println!("Loading OBJ file: {}", obj_path);

    let file = File::open(obj_path)?;
    let mesh = obj::parse_obj(BufReader::new(file))
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;

    println!(
        "Loaded {} welded vertices, {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    println!("Starting terminal viewer (press Q to quit)...");
    std::thread::sleep(std::time::Duration::from_secs(1));

    let mut app = TerminalApp::new(mesh)?;
    app.run()
}
