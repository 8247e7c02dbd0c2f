#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (Vec<(String, String)>, String)| {
    let mut router: routree::Router<()> = routree::Router::new();

    for (method, route) in data.0 {
        if router.insert(&method, &route, vec![()]).is_err() {
            return;
        }
    }

    router.sort();
    let _ = router.at("GET", &data.1);
});
