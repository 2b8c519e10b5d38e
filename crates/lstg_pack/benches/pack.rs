use divan::AllocProfiler;

#[global_allocator]
static ALLOC: AllocProfiler = AllocProfiler::system();

fn main() {
    divan::main();
}

pub mod read {
    use divan::Bencher;
    use lstg_pack::{Archive, FileManager};
    use std::io::{Cursor, Write};
    use std::sync::OnceLock;
    use tempfile::TempDir;
    use zip::{write::SimpleFileOptions, ZipWriter};

    const ENTRIES: usize = 256;

    fn get_input() -> &'static (TempDir, String) {
        static INPUT: OnceLock<(TempDir, String)> = OnceLock::new();
        INPUT.get_or_init(|| {
            let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
            for i in 0..ENTRIES {
                zip.start_file(format!("data/{i:04}.bin"), SimpleFileOptions::default())
                    .unwrap();
                zip.write_all(&vec![(i % 251) as u8; 4096]).unwrap();
            }
            let bytes = zip.finish().unwrap().into_inner();

            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("bench.zip");
            std::fs::write(&path, bytes).unwrap();
            let path = path.to_string_lossy().into_owned();
            (dir, path)
        })
    }

    fn open_archive() -> Archive {
        Archive::open(&get_input().1, 0, None, 0, encoding_rs::WINDOWS_1252).unwrap()
    }

    #[divan::bench]
    fn open() {
        divan::black_box(open_archive());
    }

    #[divan::bench]
    fn precheck(bencher: Bencher) {
        let archive = open_archive();
        bencher.bench_local(|| {
            divan::black_box(archive.file_precheck("data/0128.bin"));
        });
    }

    #[divan::bench]
    fn precheck_legacy_fallback(bencher: Bencher) {
        let archive = open_archive();
        bencher.bench_local(|| {
            divan::black_box(archive.file_precheck("data/missing.bin"));
        });
    }

    #[divan::bench(sample_count = 1)]
    fn load_file_all(bencher: Bencher) {
        let mut archive = open_archive();
        bencher.bench_local(move || {
            for i in 0..ENTRIES {
                divan::black_box(archive.load_file(&format!("data/{i:04}.bin")).unwrap());
            }
        });
    }

    #[divan::bench]
    fn stacked_lookup(bencher: Bencher) {
        let mut manager = FileManager::new();
        for priority in 0..8 {
            manager.load_archive(&get_input().1, priority, None).unwrap();
        }
        bencher.bench_local(move || {
            divan::black_box(manager.find_archive("data/0255.bin").map(|a| a.uid()));
        });
    }
}
