/// Pointer buttons relevant to challenge validation.
///
/// Move, click, scroll and double-click events all carry a position; for
/// recording purposes every kind reduces to that position sample, so only
/// the button identity needs its own type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}
