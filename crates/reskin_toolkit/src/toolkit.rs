//! Handle types and the host adapter trait.

use reskin_color::Color;
use slotmap::new_key_type;

use crate::{Attr, Result, StyleState, WidgetKind};

new_key_type! {
    /// A live window.
    pub struct WindowId;
    /// A live widget inside a window.
    pub struct WidgetId;
    /// A toolkit-internal container frame (e.g. the row frame holding a
    /// widget, or the frames nested inside a scrollable container).
    pub struct FrameId;
    /// A menu or submenu handle.
    pub struct MenuId;
}

/// Capability snapshot for one widget.
///
/// The declared [`WidgetKind`] selects the attribute mapping; the optional
/// sub-handles advertise structural capabilities (an attached menu, a
/// styled scrollbar, a popdown listbox, nested scroll frames) that refine
/// the treatment within a kind.
#[derive(Clone, Debug, Default)]
pub struct WidgetInfo {
    pub kind: WidgetKind,
    /// Caller-assigned tag used by include/exclude filtering.
    pub tag: Option<String>,
    /// Structural marker for custom title bar widgets.
    pub titlebar: bool,
    /// The row container holding this widget, if the toolkit wraps rows.
    pub row_frame: Option<FrameId>,
    /// A context menu popped up by right-clicking this widget.
    pub right_click_menu: Option<MenuId>,
    /// The menu owned by this widget (menu bars, button menus, option
    /// menus).
    pub menu: Option<MenuId>,
    /// The style database name driving this widget, for styled toolkits.
    pub style: Option<String>,
    /// Style name of an attached vertical scrollbar.
    pub vertical_scrollbar_style: Option<String>,
    /// Style name of an attached horizontal scrollbar.
    pub horizontal_scrollbar_style: Option<String>,
    /// The popdown listbox of a combo box; a separate widget from the
    /// combo's visible field.
    pub popdown: Option<WidgetId>,
    /// Outer frame of a scrollable container.
    pub column_frame: Option<FrameId>,
    /// Content frame nested inside a scrollable container's canvas.
    pub column_body: Option<FrameId>,
}

/// Host adapter over a concrete widget toolkit.
///
/// All methods operate on opaque handles; a dead handle yields
/// [`crate::ToolkitError::WidgetDestroyed`]. Implementations are expected
/// to be single-threaded and called only from the thread that owns the
/// widgets.
pub trait Toolkit {
    // ---- theme authority ----

    /// Theme name the toolkit will use for future windows.
    fn current_theme(&self) -> String;
    /// Set the theme name for future windows.
    fn set_current_theme(&mut self, name: &str);

    // ---- windows ----

    /// Enumerate every widget reachable from the window, in layout order.
    fn window_widgets(&self, window: WindowId) -> Result<Vec<WidgetId>>;
    fn window_background(&self, window: WindowId) -> Result<Color>;
    fn window_set_background(&mut self, window: WindowId, color: Color) -> Result<()>;
    /// Toolkit default for a window-level attribute.
    fn window_default(&self, attr: Attr) -> Result<Color>;
    /// Trigger a redraw of the window.
    fn window_refresh(&mut self, window: WindowId) -> Result<()>;
    fn window_transparency_key(&self, window: WindowId) -> Result<Option<Color>>;
    fn window_set_transparency_key(&mut self, window: WindowId, key: Option<Color>)
        -> Result<()>;

    // ---- widgets ----

    fn widget_info(&self, widget: WidgetId) -> Result<WidgetInfo>;
    /// Whether the widget accepts this attribute at all.
    fn widget_accepts(&self, widget: WidgetId, attr: Attr) -> Result<bool>;
    /// Current value of an attribute, if the widget carries one.
    fn widget_attr(&self, widget: WidgetId, attr: Attr) -> Result<Option<Color>>;
    fn widget_configure(&mut self, widget: WidgetId, attr: Attr, color: Color) -> Result<()>;
    /// Toolkit default value for this widget kind's attribute.
    fn widget_default(&self, kind: WidgetKind, attr: Attr) -> Result<Color>;

    // ---- container frames ----

    fn frame_attr(&self, frame: FrameId, attr: Attr) -> Result<Option<Color>>;
    fn frame_configure(&mut self, frame: FrameId, attr: Attr, color: Color) -> Result<()>;
    fn frame_default(&self, attr: Attr) -> Result<Color>;
    /// Whether `widget` sits inside `frame` (used to recognize title bar
    /// siblings once the marker widget's frame is known).
    fn frame_contains(&self, frame: FrameId, widget: WidgetId) -> Result<bool>;

    // ---- menus ----

    /// Number of entries in the menu; zero terminates a traversal.
    fn menu_len(&self, menu: MenuId) -> Result<usize>;
    /// Set a menu-level attribute (as opposed to a per-entry one).
    fn menu_configure(&mut self, menu: MenuId, attr: Attr, color: Color) -> Result<()>;
    /// Whether a given entry accepts an attribute (separator entries, for
    /// instance, take no active colors).
    fn menu_entry_accepts(&self, menu: MenuId, index: usize, attr: Attr) -> Result<bool>;
    fn menu_entry_configure(
        &mut self,
        menu: MenuId,
        index: usize,
        attr: Attr,
        color: Color,
    ) -> Result<()>;
    /// Direct submenus of a menu.
    fn submenus(&self, menu: MenuId) -> Result<Vec<MenuId>>;
    fn menu_default(&self, attr: Attr) -> Result<Color>;

    // ---- style database ----

    fn style_configure(&mut self, style: &str, attr: Attr, color: Color) -> Result<()>;
    /// Replace the state map of one style attribute.
    fn style_map(
        &mut self,
        style: &str,
        attr: Attr,
        states: &[(StyleState, Color)],
    ) -> Result<()>;
}
