//! Theme-relevant widget attributes and style states.

/// A color-valued widget or style attribute.
///
/// This is the closed set of attributes the dispatcher writes; adapters map
/// each to whatever their toolkit calls it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Attr {
    Background,
    Foreground,
    ActiveBackground,
    ActiveForeground,
    SelectBackground,
    SelectForeground,
    /// Toggle indicator color of checkboxes and radio buttons.
    SelectColor,
    /// Text insertion cursor color.
    InsertBackground,
    HighlightBackground,
    /// Background of a spin box's increment/decrement buttons.
    ButtonBackground,
    TroughColor,
    FieldBackground,
    FieldColor,
    ArrowColor,
    FrameColor,
    BorderColor,
}

/// A widget state within a style state-map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StyleState {
    Active,
    Pressed,
    Selected,
    Readonly,
    Background,
    /// The toolkit's negated focus state (`!focus`).
    NotFocus,
}
