//! Closed enumeration of semantic widget kinds.

/// The semantic kind a host adapter declares for each live widget.
///
/// Dispatch is driven by this declared kind plus the capability markers in
/// [`crate::WidgetInfo`], never by toolkit class-name strings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    Button,
    ButtonMenu,
    Canvas,
    Checkbox,
    Column,
    Combo,
    Frame,
    Input,
    Listbox,
    Menu,
    Multiline,
    OptionMenu,
    ProgressBar,
    Radio,
    /// Scrollbar sub-widgets; used for default lookups, never declared for
    /// an enumerated widget.
    Scrollbar,
    Sizegrip,
    Slider,
    Spin,
    StatusBar,
    TabGroup,
    Table,
    Text,
    Tree,
    HorizontalSeparator,
    VerticalSeparator,
    /// Fallback for widgets with no dedicated treatment; they still receive
    /// the generic background tweak.
    #[default]
    Other,
}
