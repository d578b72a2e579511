/// Feeds local transitions, one tick each, at absolute times in ms, and
/// checks every report produced.
#[macro_export]
macro_rules! key_sequence_test {
    (keyboard: $keyboard:expr, sequence: [$([$row:expr, $col:expr, $pressed:expr, $time:expr]),* $(,)?], expected_reports: [$($report:expr),* $(,)?]) => {{
        let mut keyboard = $keyboard;
        let mut reports: Vec<corne::report::ResolvedAction> = Vec::new();
        $(
            reports.extend(keyboard.tick(
                $crate::common::at($time),
                [corne::KeyEvent {
                    row: $row,
                    col: $col,
                    pressed: $pressed,
                }],
            ));
        )*
        let expected: Vec<corne::report::ResolvedAction> = vec![$($report),*];
        assert_eq!(reports, expected);
        keyboard
    }};
}
