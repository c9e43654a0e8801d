/// Time an expression and report it under the `profile` log scope.
#[macro_export]
macro_rules! profile {
    ($description:expr, $block:expr) => {{
        let start = std::time::Instant::now();
        let result = $block;
        let elapsed = start.elapsed();
        $crate::scoped_log!(TRACE, "profile", "{} took {:?}", $description, elapsed);
        result
    }};
}
