use payloadgen::{ContentKind, RandomSource, RootModule};

#[test]
fn each_vu_owns_its_generator() {
    let root = RootModule::with_source(RandomSource::seeded(21));

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|id| {
                let vu = root.new_module_instance(id);
                s.spawn(move || {
                    let mut g = vu.generator(128, "random").unwrap();
                    for _ in 0..2_000 {
                        let p = g.gen_payload(true);
                        assert_eq!(p.data.len(), 128);
                        assert_eq!(p.hash.len(), 64);
                    }
                    vu.vu_id()
                })
            })
            .collect();

        let mut ids: Vec<u64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        ids.sort();
        assert_eq!(ids, vec![0, 1, 2, 3]);
    });
}

#[test]
fn instance_validates_like_generator() {
    let root = RootModule::with_source(RandomSource::seeded(1));
    let vu = root.new_module_instance(0);
    assert!(vu.generator(-1, "text").is_err());
    assert_eq!(vu.generator(1, "bogus").unwrap().kind(), ContentKind::Unspecified);
    assert_eq!(vu.generator(1, "text").unwrap().kind(), ContentKind::Text);
}

#[test]
fn default_root_is_usable() {
    let root = RootModule::default();
    let mut g = root.new_module_instance(0).generator(10, "").unwrap();
    assert_eq!(g.next_slice().len(), 10);
}
