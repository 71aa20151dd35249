//! List a RAR archive and extract its stored entries to disk.
//!
//! Usage:
//!   cargo run --example extract -- archive.rar [output_dir]
//!   cargo run --example extract -- https://example.com/archive.rar [output_dir]
//!
//! Set `RUST_LOG=rar_peek=debug` to trace the header walk.

use rar_peek::RarArchive;
use std::path::Path;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: extract <archive.rar|url> [output_dir]");
        eprintln!("  extract ./files.rar ./out/");
        std::process::exit(1);
    }

    let source = &args[1];
    let archive = if source.starts_with("http://") || source.starts_with("https://") {
        RarArchive::from_uri(source).await?
    } else {
        RarArchive::from_local(source).await?
    };

    println!("{} entr(y/ies) in archive:", archive.len());
    for e in archive.entries() {
        println!(
            "  {:<40} {:>12} {:>12}  {}  {}  {}{}",
            e.path,
            e.size,
            e.size_packed,
            e.time,
            e.os,
            e.compression_method()
                .map_or_else(|| format!("method 0x{:02x}", e.method), |m| format!("{:?}", m)),
            if e.partial { "  (split)" } else { "" }
        );
    }

    let Some(output_dir) = args.get(2).map(Path::new) else {
        return Ok(());
    };
    std::fs::create_dir_all(output_dir)?;

    for e in archive.entries() {
        if !e.is_stored() || e.encrypted {
            println!("Skipping {} (compressed or encrypted)", e.path);
            continue;
        }
        let blob = archive.extract(e).await?;
        let out_path = output_dir.join(&e.name);
        std::fs::write(&out_path, blob.data())?;
        println!("Extracted {} ({} bytes)", e.name, blob.len());
    }

    Ok(())
}
