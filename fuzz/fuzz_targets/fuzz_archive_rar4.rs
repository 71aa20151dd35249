#![no_main]
use libfuzzer_sys::fuzz_target;
use rar_peek::RarArchive;

// Fuzz a complete RAR4 archive: walk the headers then extract every
// stored entry.
fuzz_target!(|data: &[u8]| {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();

    runtime.block_on(async {
        let archive = match RarArchive::from_bytes(data.to_vec()).await {
            Ok(a) => a,
            Err(_) => return,
        };
        for entry in archive.entries() {
            if let Ok(blob) = archive.extract(entry).await {
                assert_eq!(blob.len() as u64, entry.size_packed);
            }
        }
    });
});
