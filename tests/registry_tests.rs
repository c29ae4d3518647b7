//! Named parser instances.

use std::sync::Arc;

use blockdown::registry::DEFAULT_INSTANCE;
use blockdown::{instance, Options, Registry};

#[test]
fn global_instance_is_shared() {
    let a = instance(DEFAULT_INSTANCE);
    let b = instance(DEFAULT_INSTANCE);
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(a.render_document("*x*"), "<p><em>x</em></p>");
}

#[test]
fn names_are_independent() {
    let registry = Registry::new();
    let plain = registry.get_or_create("plain");
    let safe = registry.get_or_insert_with("safe", || Options {
        safe_mode: true,
        ..Options::default()
    });
    assert!(!Arc::ptr_eq(&plain, &safe));
    assert_eq!(plain.render_document("<b>x</b>"), "<p><b>x</b></p>");
    assert_eq!(safe.render_document("<b>x</b>"), "<p>&lt;b&gt;x&lt;/b&gt;</p>");
}

#[test]
fn shared_parser_across_threads() {
    let parser = instance("threads");
    let outputs: Vec<String> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let parser = Arc::clone(&parser);
                scope.spawn(move || parser.render_document(&format!("[l]: /{i}\n\n[l]")))
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    for (i, html) in outputs.iter().enumerate() {
        assert_eq!(html, &format!("<p><a href=\"/{i}\">l</a></p>"));
    }
}
