//! Per-file transformation tests through the loader entry point

mod common;

use common::MockHost;
use component_style_loader::{
    DescriptorCache, Diagnostic, LoaderOptions, LoaderWarning, Pattern, RawComponentSpec,
    ResolutionTarget, StyleLoader, TransformKind,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

fn loader(options: LoaderOptions) -> StyleLoader {
    StyleLoader::with_cache(options.with_root_dir("/app"), Arc::new(DescriptorCache::new()))
}

fn components(test: &str) -> LoaderOptions {
    LoaderOptions::new(vec![
        RawComponentSpec::default().with_test(Pattern::new(test).unwrap())
    ])
}

#[tokio::test]
async fn test_unmatched_file_passes_through() {
    let host = MockHost::development();
    let source = "export const A = './a.png';\n";

    let output = loader(components("src/components"))
        .run(source, Path::new("/app/lib/assets/index.js"), &host)
        .await
        .unwrap();

    assert_eq!(output.code, source);
    assert_eq!(output.kind, TransformKind::Passthrough);
}

#[tokio::test]
async fn test_asset_index_is_rewritten_without_injection() {
    let host = MockHost::development().with_file(
        "/app/src/assets",
        "./style/index.css",
        "/app/src/assets/style/index.css",
    );
    let source = "export const LOGO = './logo.svg';\nexport const ICON = \"./icon.png\";\n";

    let output = loader(components("src/"))
        .run(source, Path::new("/app/src/assets/index.js"), &host)
        .await
        .unwrap();

    assert_eq!(
        output.code,
        "export { default as LOGO } from './logo.svg';\nexport { default as ICON } from \"./icon.png\";\n"
    );
    assert_eq!(output.kind, TransformKind::AssetsRewritten);
    assert!(host.dependencies().is_empty());
    assert_eq!(host.resolve_count("./style/index.css"), 0);
}

#[tokio::test]
async fn test_component_style_appended_in_static_dialect() {
    let host = MockHost::development().with_file(
        "/app/src/button",
        "./style/index.css",
        "/app/src/button/style/index.css",
    );
    let source = "import React from 'react';\nexport default function Button() {}\n";

    let output = loader(components("src/"))
        .run(source, Path::new("/app/src/button/index.js"), &host)
        .await
        .unwrap();

    assert_eq!(
        output.code,
        format!("{}\nimport './style/index.css';\n", source)
    );
    assert_eq!(output.kind, TransformKind::StyleInjected);
    assert_eq!(
        host.dependencies(),
        vec![PathBuf::from("/app/src/button/style/index.css")]
    );
    assert!(host.warnings().is_empty());
}

#[tokio::test]
async fn test_component_style_appended_in_legacy_dialect() {
    let host = MockHost::development().with_file(
        "/app/src/card",
        "./style/index.less",
        "/app/src/card/style/index.less",
    );
    let options = LoaderOptions::new(vec![RawComponentSpec::default()
        .with_test(Pattern::new("src/").unwrap())
        .with_style("less")]);
    let source = "const React = require('react');\nmodule.exports = Card;\n";

    let output = loader(options)
        .run(source, Path::new("/app/src/card/index.js"), &host)
        .await
        .unwrap();

    assert_eq!(
        output.code,
        format!("{}\nrequire('./style/index.less');\n", source)
    );
    assert_eq!(host.dependencies().len(), 1);
}

#[tokio::test]
async fn test_missing_style_leaves_source_byte_identical() {
    let source = "export default function Button() {}\r\n";

    let host = MockHost::development();
    let output = loader(components("src/"))
        .run(source, Path::new("/app/src/button/index.js"), &host)
        .await
        .unwrap();

    assert_eq!(output.code, source);
    assert_eq!(output.kind, TransformKind::StyleSkipped);
    assert!(host.dependencies().is_empty());
    assert!(matches!(
        host.diagnostics().as_slice(),
        [Diagnostic::ResolutionFailure {
            target: ResolutionTarget::StyleModule,
            context,
            ..
        }] if context == Path::new("/app/src/button")
    ));

    let host = MockHost::production();
    let output = loader(components("src/"))
        .run(source, Path::new("/app/src/button/index.js"), &host)
        .await
        .unwrap();
    assert_eq!(output.code, source);
    assert!(host.diagnostics().is_empty());
}

#[tokio::test]
async fn test_default_reexport_warns_but_still_injects() {
    let host = MockHost::production().with_file(
        "/app/src/button",
        "./style/index.css",
        "/app/src/button/style/index.css",
    );
    let source = "export { default } from './Button';\n";

    let output = loader(components("src/"))
        .run(source, Path::new("/app/src/button/index.js"), &host)
        .await
        .unwrap();

    assert_eq!(output.kind, TransformKind::StyleInjected);
    assert_eq!(
        host.warnings(),
        vec![LoaderWarning::FragileReexport {
            resource: PathBuf::from("/app/src/button/index.js"),
        }]
    );
}

#[tokio::test]
async fn test_later_spec_overrides_earlier_match() {
    let host = MockHost::development()
        .with_file(
            "/app/src/button",
            "./style/index.less",
            "/app/src/button/style/index.less",
        )
        .with_file(
            "/app/src/card",
            "./style/index.css",
            "/app/src/card/style/index.css",
        );
    let options = LoaderOptions::new(vec![
        RawComponentSpec::default().with_test(Pattern::new("src/").unwrap()),
        RawComponentSpec::default()
            .with_test(Pattern::new("src/button").unwrap())
            .with_style("less"),
    ]);
    let loader = loader(options);

    let button = loader
        .run("export default 1;\n", Path::new("/app/src/button/index.js"), &host)
        .await
        .unwrap();
    assert!(button.code.ends_with("\nimport './style/index.less';\n"));

    let card = loader
        .run("export default 2;\n", Path::new("/app/src/card/index.js"), &host)
        .await
        .unwrap();
    assert!(card.code.ends_with("\nimport './style/index.css';\n"));
}

#[tokio::test]
async fn test_matched_non_entry_file_passes_through() {
    let host = MockHost::development();
    let source = "export default function Button() {}\n";

    let output = loader(components("src/"))
        .run(source, Path::new("/app/src/button/Button.js"), &host)
        .await
        .unwrap();

    assert_eq!(output.kind, TransformKind::Passthrough);
    assert!(host.resolve_calls().is_empty());
}

#[tokio::test]
async fn test_custom_rules() {
    let host = MockHost::development().with_file(
        "/app/src/button",
        "./style/index.css",
        "/app/src/button/style/index.css",
    );
    let options = LoaderOptions::new(vec![RawComponentSpec::default()
        .with_test(Pattern::new("src/").unwrap())
        .with_component_rule(Pattern::new(r"/entry\.js$").unwrap())
        .with_assets_rule(Pattern::new(r"/media\.js$").unwrap())]);
    let loader = loader(options);

    let entry = loader
        .run("export default 1;\n", Path::new("/app/src/button/entry.js"), &host)
        .await
        .unwrap();
    assert_eq!(entry.kind, TransformKind::StyleInjected);

    let media = loader
        .run("export const A = './a.png';\n", Path::new("/app/src/media.js"), &host)
        .await
        .unwrap();
    assert_eq!(media.kind, TransformKind::AssetsRewritten);

    let index = loader
        .run("export default 1;\n", Path::new("/app/src/button/index.js"), &host)
        .await
        .unwrap();
    assert_eq!(index.kind, TransformKind::Passthrough);
}

#[tokio::test]
async fn test_base_styles_prepended_in_reverse_order() {
    let host = MockHost::development()
        .with_file("/app", "./a.css", "/app/a.css")
        .with_file("/app", "./b.css", "/app/b.css")
        .with_file("/app", "./c.css", "/app/c.css");
    let options = LoaderOptions::new(vec![
        RawComponentSpec::default()
            .with_test(Pattern::new("src/a").unwrap())
            .with_base_style("./a"),
        RawComponentSpec::default()
            .with_test(Pattern::new("src/b").unwrap())
            .with_base_style("./b"),
        RawComponentSpec::default()
            .with_test(Pattern::new("src/c").unwrap())
            .with_base_style("./c"),
    ])
    .with_base_style_target("/app/src/main.js");
    let loader = loader(options);

    let source = "import App from './App';\n";
    let output = loader
        .run(source, Path::new("/app/src/main.js"), &host)
        .await
        .unwrap();

    assert_eq!(output.kind, TransformKind::BaseStylesPrepended);
    assert_eq!(
        output.code,
        "\nimport '/app/c.css';\n\nimport '/app/b.css';\n\nimport '/app/a.css';\nimport App from './App';\n"
    );
    assert_eq!(
        host.dependencies(),
        vec![
            PathBuf::from("/app/a.css"),
            PathBuf::from("/app/b.css"),
            PathBuf::from("/app/c.css"),
        ]
    );

    let legacy = loader
        .run("module.exports = App;\n", Path::new("/app/src/main.js"), &host)
        .await
        .unwrap();
    assert!(legacy.code.starts_with(
        "\nrequire('/app/c.css');\n\nrequire('/app/b.css');\n\nrequire('/app/a.css');\n"
    ));
}

#[tokio::test]
async fn test_base_style_target_without_base_styles() {
    let host = MockHost::development();
    let options = components("src/").with_base_style_target("/app/src/main.js");
    let source = "import App from './App';\n";

    let output = loader(options)
        .run(source, Path::new("/app/src/main.js"), &host)
        .await
        .unwrap();

    assert_eq!(output.code, source);
    assert!(host.dependencies().is_empty());
}
