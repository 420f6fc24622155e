/// Everything the user can ask for, from buttons or the keyboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    Digit(char),
    DeleteDigit,
    Back,
    LightCandles,
    ToggleMusic,
    ToggleHint,
    ToggleSecret,
}
