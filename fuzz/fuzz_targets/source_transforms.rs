#![no_main]
use libfuzzer_sys::fuzz_target;
use component_style_loader::transform::rewrite_asset_exports;
use component_style_loader::{Dialect, Placement, StyleInjector};

fuzz_target!(|data: &[u8]| {
    // Arbitrary source text must never panic and never be reordered
    let Ok(source) = std::str::from_utf8(data) else {
        return;
    };

    let once = rewrite_asset_exports(source);
    let twice = rewrite_asset_exports(&once);
    assert_eq!(once, twice, "asset rewrite is not idempotent");

    let _ = Dialect::detect(source);

    let appended = StyleInjector::inject(source, &["./style/index.css"], Placement::Append);
    assert!(appended.starts_with(source));

    let prepended = StyleInjector::inject(source, &["/app/base.css"], Placement::Prepend);
    assert!(prepended.ends_with(source));
});
