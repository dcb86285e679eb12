use tagcloud::Tag;

// Runs before any test in the binary; the subscriber is process-global.
#[ctor::ctor]
unsafe fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

#[allow(dead_code)]
pub fn skills() -> Vec<Tag> {
    vec![
        Tag::new("JavaScript", 38.0),
        Tag::new("React", 30.0),
        Tag::new("Nodejs", 28.0),
        Tag::new("Express.js", 25.0),
        Tag::new("HTML5", 33.0),
        Tag::new("MongoDB", 18.0),
        Tag::new("CSS3", 20.0),
    ]
}
