use ctxkit_logging::{init, Logger, Profile, TracingLogger};

#[test]
fn test_init_idempotent() {
    // Multiple calls should not panic
    init(Profile::Test);
    init(Profile::Test);
    init(Profile::Production);

    TracingLogger::new().infow("after init", &[]);
}
