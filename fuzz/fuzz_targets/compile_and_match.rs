#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (Vec<(String, Vec<String>)>, String)| {
    let mut router = curly::Router::new();

    for (root, routes) in data.0 {
        let Ok(service) = router.insert(&root) else {
            return;
        };
        for route in routes {
            if service.get(&route, ()).is_err() {
                return;
            }
        }
    }

    let _ = router.at(&http::Method::GET, &data.1);
    let _ = router.allowed(&data.1);
});
