use divan::AllocProfiler;

#[global_allocator]
static ALLOC: AllocProfiler = AllocProfiler::system();

fn main() {
    divan::main();
}

fn get_input(name: &str) -> String {
    std::fs::read_to_string(format!(
        "{}/resources/{name}",
        env!("CARGO_MANIFEST_DIR")
    ))
    .unwrap()
}

pub mod parse {
    use divan::Bencher;

    use super::get_input;

    #[divan::bench(args = ["blcmm.blcm", "filtertool.txt", "generic.txt", "hotfixes.bl3hotfix"])]
    fn dialect(bencher: Bencher, name: &str) {
        bencher
            .with_inputs(|| get_input(name))
            .bench_refs(|contents| {
                divan::black_box(tml_parser::parse_str(contents).unwrap());
            });
    }

    #[divan::bench]
    fn long_hotfix_tail(bencher: Bencher) {
        bencher
            .with_inputs(|| {
                let mut contents = get_input("generic.txt");
                for idx in 0..10_000 {
                    contents.push_str(&format!("set Foo.Bar_{idx} Baz {idx}\n"));
                }
                contents
            })
            .bench_refs(|contents| {
                divan::black_box(tml_parser::parse_str(contents).unwrap());
            });
    }
}

pub mod info {
    use divan::Bencher;

    use super::get_input;

    #[divan::bench]
    fn from_result(bencher: Bencher) {
        let result = tml_parser::parse_str(&get_input("blcmm.blcm")).unwrap();

        bencher.bench_local(|| {
            divan::black_box(tml_parser::ModInfo::from_result(&result, "blcmm.blcm"));
        });
    }
}
