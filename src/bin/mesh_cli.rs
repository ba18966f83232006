#[cfg(target_arch = "wasm32")]
fn main() {
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    if let Err(err) = native::run() {
        eprintln!("mesh_cli error: {err}");
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use shape_engine::Engine;
    use shape_engine::geom::SurfaceMesh;
    use shape_engine::shapes::ShapeKind;
    use std::fs::{self, File};
    use std::io::{BufWriter, Write};
    use std::path::{Path, PathBuf};

    const USAGE: &str = r#"mesh_cli (shape-engine)

USAGE:
  mesh_cli list
  mesh_cli build <shape> [options]

OPTIONS (build):
  --res <UxV>        Grid resolution, e.g. 40x20 (default 30x30; disks and
                     open cylinders keep their own single-row grid)
  --obj <path>       Write the strip mesh as OBJ
  --overwrite        Overwrite an existing OBJ file
  -h, --help         Show this help
"#;

    pub fn run() -> Result<(), String> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let mut args = Args::new(args);

        let Some(command) = args.next() else {
            print_usage();
            return Ok(());
        };

        match command.as_str() {
            "list" => {
                for kind in ShapeKind::ALL {
                    println!("{kind}");
                }
                Ok(())
            }
            "build" => cmd_build(&mut args),
            "-h" | "--help" | "help" => {
                print_usage();
                Ok(())
            }
            other => Err(format!("unknown command `{other}`\n\n{USAGE}")),
        }
    }

    fn print_usage() {
        println!("{USAGE}");
    }

    fn cmd_build(args: &mut Args) -> Result<(), String> {
        let shape_name = args.next().ok_or("missing shape name")?;

        let mut engine = Engine::new();
        let mut obj_path: Option<PathBuf> = None;
        let mut overwrite = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--res" => {
                    let (u_count, v_count) = parse_resolution(&args.value("--res")?)?;
                    engine.set_resolution(u_count, v_count).map_err(|_| {
                        format!("resolution must be positive, got {u_count}x{v_count}")
                    })?;
                }
                "--obj" => obj_path = Some(PathBuf::from(args.value("--obj")?)),
                "--overwrite" => overwrite = true,
                "-h" | "--help" => {
                    print_usage();
                    return Ok(());
                }
                other => return Err(format!("unknown option `{other}`\n\n{USAGE}")),
            }
        }

        let (kind, mesh, diagnostics) = engine.mesh_for(&shape_name).map_err(|e| e.to_string())?;

        if let Some(path) = obj_path.as_deref() {
            write_obj_file(path, &mesh, kind.name(), overwrite)?;
            eprintln!("wrote {}", path.display());
        }

        eprintln!(
            "{kind}: vertices={} triangles={} | {}",
            mesh.vertex_count(),
            mesh.triangle_count(),
            diagnostics.summary()
        );
        for warning in &diagnostics.warnings {
            eprintln!("  warning: {warning}");
        }

        Ok(())
    }

    fn parse_resolution(text: &str) -> Result<(u32, u32), String> {
        let (u, v) = text
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("expected <UxV>, got `{text}`"))?;
        let parse = |s: &str| {
            s.trim()
                .parse::<u32>()
                .map_err(|e| format!("invalid resolution `{text}`: {e}"))
        };
        Ok((parse(u)?, parse(v)?))
    }

    fn write_obj_file(
        path: &Path,
        mesh: &SurfaceMesh,
        name: &str,
        overwrite: bool,
    ) -> Result<(), String> {
        mesh.validate().map_err(|e| format!("mesh validation failed: {e}"))?;

        if path.exists() && !overwrite {
            return Err(format!(
                "refusing to overwrite existing file {} (use --overwrite)",
                path.display()
            ));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("create dir {}: {e}", parent.display()))?;
        }

        let file = File::create(path).map_err(|e| format!("create {}: {e}", path.display()))?;
        let mut w = BufWriter::new(file);

        writeln!(w, "# shape-engine mesh_cli").map_err(|e| format!("write obj: {e}"))?;
        writeln!(w, "o {name}").map_err(|e| format!("write obj: {e}"))?;

        for p in &mesh.positions {
            writeln!(w, "v {} {} {}", p[0], p[1], p[2]).map_err(|e| format!("write obj: {e}"))?;
        }
        for uv in &mesh.uvs {
            writeln!(w, "vt {} {}", uv[0], uv[1]).map_err(|e| format!("write obj: {e}"))?;
        }
        for n in &mesh.normals {
            writeln!(w, "vn {} {} {}", n[0], n[1], n[2]).map_err(|e| format!("write obj: {e}"))?;
        }

        // strip row bridges show up as zero-area faces
        for tri in mesh.indices.chunks_exact(3) {
            let a = tri[0] + 1;
            let b = tri[1] + 1;
            let c = tri[2] + 1;
            writeln!(w, "f {a}/{a}/{a} {b}/{b}/{b} {c}/{c}/{c}")
                .map_err(|e| format!("write obj: {e}"))?;
        }

        w.flush().map_err(|e| format!("flush {}: {e}", path.display()))
    }

    struct Args {
        args: Vec<String>,
        pos: usize,
    }

    impl Args {
        fn new(args: Vec<String>) -> Self {
            Self { args, pos: 0 }
        }

        fn next(&mut self) -> Option<String> {
            let arg = self.args.get(self.pos)?.clone();
            self.pos += 1;
            Some(arg)
        }

        fn value(&mut self, flag: &str) -> Result<String, String> {
            self.next().ok_or_else(|| format!("missing value for {flag}"))
        }
    }

}
