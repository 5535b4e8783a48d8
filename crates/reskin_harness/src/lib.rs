//! In-memory fake toolkit for engine tests.
//!
//! [`FakeToolkit`] implements [`Toolkit`] over slotmap-backed windows,
//! widgets, frames, menus, and a style database. Every state-changing call
//! is counted, so tests can assert "zero mutations" short-circuits and
//! per-widget golden mappings. Windows can be destroyed outright or after
//! a mutation budget, which makes the destroyed-mid-pass semantics of the
//! engine observable.

use rustc_hash::{FxHashMap, FxHashSet};
use slotmap::SlotMap;

use reskin_color::Color;
use reskin_toolkit::{
    Attr, FrameId, MenuId, Result, StyleState, Toolkit, ToolkitError, WidgetId, WidgetInfo,
    WidgetKind, WindowId,
};

/// Fallback toolkit-native default color.
pub const FALLBACK_DEFAULT: Color = Color::rgb(217.0 / 255.0, 217.0 / 255.0, 217.0 / 255.0);

struct FakeWindow {
    background: Color,
    transparency_key: Option<Color>,
    widgets: Vec<WidgetId>,
    refreshes: usize,
    destroyed: bool,
}

struct FakeWidget {
    window: WindowId,
    info: WidgetInfo,
    attrs: FxHashMap<Attr, Color>,
    accepts: FxHashSet<Attr>,
    mutations: usize,
    destroyed: bool,
}

struct FakeFrame {
    window: WindowId,
    background: Option<Color>,
    members: FxHashSet<WidgetId>,
    mutations: usize,
    destroyed: bool,
}

struct FakeMenu {
    window: WindowId,
    entries: Vec<FxHashMap<Attr, Color>>,
    entry_accepts: FxHashSet<Attr>,
    attrs: FxHashMap<Attr, Color>,
    submenus: Vec<MenuId>,
    destroyed: bool,
}

#[derive(Default)]
struct FakeStyle {
    settings: FxHashMap<Attr, Color>,
    maps: FxHashMap<Attr, Vec<(StyleState, Color)>>,
}

/// Builder for one fake widget.
#[derive(Default)]
pub struct WidgetSpec {
    info: WidgetInfo,
    accepts: Vec<Attr>,
    attrs: Vec<(Attr, Color)>,
}

impl WidgetSpec {
    pub fn new(kind: WidgetKind) -> Self {
        Self {
            info: WidgetInfo {
                kind,
                ..WidgetInfo::default()
            },
            ..Self::default()
        }
    }

    pub fn tag(mut self, tag: &str) -> Self {
        self.info.tag = Some(tag.to_owned());
        self
    }

    pub fn titlebar(mut self) -> Self {
        self.info.titlebar = true;
        self
    }

    pub fn row_frame(mut self, frame: FrameId) -> Self {
        self.info.row_frame = Some(frame);
        self
    }

    pub fn right_click_menu(mut self, menu: MenuId) -> Self {
        self.info.right_click_menu = Some(menu);
        self
    }

    pub fn menu(mut self, menu: MenuId) -> Self {
        self.info.menu = Some(menu);
        self
    }

    pub fn style(mut self, style: &str) -> Self {
        self.info.style = Some(style.to_owned());
        self
    }

    pub fn vertical_scrollbar_style(mut self, style: &str) -> Self {
        self.info.vertical_scrollbar_style = Some(style.to_owned());
        self
    }

    pub fn horizontal_scrollbar_style(mut self, style: &str) -> Self {
        self.info.horizontal_scrollbar_style = Some(style.to_owned());
        self
    }

    pub fn popdown(mut self, widget: WidgetId) -> Self {
        self.info.popdown = Some(widget);
        self
    }

    pub fn column_frames(mut self, outer: FrameId, body: FrameId) -> Self {
        self.info.column_frame = Some(outer);
        self.info.column_body = Some(body);
        self
    }

    /// Declare an attribute as accepted without giving it a value.
    pub fn accepts(mut self, attrs: &[Attr]) -> Self {
        self.accepts.extend_from_slice(attrs);
        self
    }

    /// Give an attribute an initial value (implies acceptance).
    pub fn attr(mut self, attr: Attr, color: Color) -> Self {
        self.attrs.push((attr, color));
        self
    }
}

/// In-memory [`Toolkit`] implementation with mutation counting.
pub struct FakeToolkit {
    current_theme: String,
    windows: SlotMap<WindowId, FakeWindow>,
    widgets: SlotMap<WidgetId, FakeWidget>,
    frames: SlotMap<FrameId, FakeFrame>,
    menus: SlotMap<MenuId, FakeMenu>,
    styles: FxHashMap<String, FakeStyle>,
    widget_defaults: FxHashMap<(WidgetKind, Attr), Color>,
    mutations: usize,
    destroy_after: Option<usize>,
}

impl FakeToolkit {
    pub fn new(current_theme: &str) -> Self {
        Self {
            current_theme: current_theme.to_owned(),
            windows: SlotMap::with_key(),
            widgets: SlotMap::with_key(),
            frames: SlotMap::with_key(),
            menus: SlotMap::with_key(),
            styles: FxHashMap::default(),
            widget_defaults: FxHashMap::default(),
            mutations: 0,
            destroy_after: None,
        }
    }

    // ---- construction ----

    pub fn add_window(&mut self) -> WindowId {
        self.windows.insert(FakeWindow {
            background: FALLBACK_DEFAULT,
            transparency_key: None,
            widgets: Vec::new(),
            refreshes: 0,
            destroyed: false,
        })
    }

    pub fn add_frame(&mut self, window: WindowId) -> FrameId {
        self.frames.insert(FakeFrame {
            window,
            background: None,
            members: FxHashSet::default(),
            mutations: 0,
            destroyed: false,
        })
    }

    pub fn add_menu(&mut self, window: WindowId, entries: usize) -> MenuId {
        self.menus.insert(FakeMenu {
            window,
            entries: vec![FxHashMap::default(); entries],
            entry_accepts: FxHashSet::default(),
            attrs: FxHashMap::default(),
            submenus: Vec::new(),
            destroyed: false,
        })
    }

    pub fn link_submenu(&mut self, parent: MenuId, child: MenuId) {
        if let Some(menu) = self.menus.get_mut(parent) {
            menu.submenus.push(child);
        }
    }

    /// Restrict which attributes this menu's entries accept.
    pub fn restrict_menu_entries(&mut self, menu: MenuId, accepts: &[Attr]) {
        if let Some(menu) = self.menus.get_mut(menu) {
            menu.entry_accepts = accepts.iter().copied().collect();
        }
    }

    /// Add a widget to the window's enumeration order.
    pub fn add_widget(&mut self, window: WindowId, spec: WidgetSpec) -> WidgetId {
        let id = self.add_detached_widget(window, spec);
        if let Some(win) = self.windows.get_mut(window) {
            win.widgets.push(id);
        }
        id
    }

    /// Add a widget owned by the window but absent from its enumeration
    /// (e.g. a combo's popdown listbox).
    pub fn add_detached_widget(&mut self, window: WindowId, spec: WidgetSpec) -> WidgetId {
        let mut accepts: FxHashSet<Attr> = spec.accepts.into_iter().collect();
        let mut attrs = FxHashMap::default();
        for (attr, color) in spec.attrs {
            accepts.insert(attr);
            attrs.insert(attr, color);
        }
        let row_frame = spec.info.row_frame;
        let id = self.widgets.insert(FakeWidget {
            window,
            info: spec.info,
            attrs,
            accepts,
            mutations: 0,
            destroyed: false,
        });
        if let Some(frame) = row_frame {
            if let Some(frame) = self.frames.get_mut(frame) {
                frame.members.insert(id);
            }
        }
        id
    }

    pub fn set_widget_default(&mut self, kind: WidgetKind, attr: Attr, color: Color) {
        self.widget_defaults.insert((kind, attr), color);
    }

    // ---- failure injection ----

    /// Mark the window and everything in it as destroyed.
    pub fn destroy_window(&mut self, window: WindowId) {
        if let Some(win) = self.windows.get_mut(window) {
            win.destroyed = true;
        }
        for (_, widget) in self.widgets.iter_mut() {
            if widget.window == window {
                widget.destroyed = true;
            }
        }
        for (_, frame) in self.frames.iter_mut() {
            if frame.window == window {
                frame.destroyed = true;
            }
        }
        for (_, menu) in self.menus.iter_mut() {
            if menu.window == window {
                menu.destroyed = true;
            }
        }
    }

    /// Fail every mutation after the given total budget, simulating a
    /// window closing mid-pass.
    pub fn destroy_after(&mut self, mutations: usize) {
        self.destroy_after = Some(mutations);
    }

    // ---- assertions ----

    pub fn total_mutations(&self) -> usize {
        self.mutations
    }

    pub fn widget_mutations(&self, widget: WidgetId) -> usize {
        self.widgets.get(widget).map_or(0, |w| w.mutations)
    }

    pub fn widget_color(&self, widget: WidgetId, attr: Attr) -> Option<Color> {
        self.widgets.get(widget).and_then(|w| w.attrs.get(&attr).copied())
    }

    pub fn frame_color(&self, frame: FrameId) -> Option<Color> {
        self.frames.get(frame).and_then(|f| f.background)
    }

    pub fn frame_mutations(&self, frame: FrameId) -> usize {
        self.frames.get(frame).map_or(0, |f| f.mutations)
    }

    pub fn refresh_count(&self, window: WindowId) -> usize {
        self.windows.get(window).map_or(0, |w| w.refreshes)
    }

    pub fn window_color(&self, window: WindowId) -> Option<Color> {
        self.windows.get(window).map(|w| w.background)
    }

    pub fn style_setting(&self, style: &str, attr: Attr) -> Option<Color> {
        self.styles
            .get(style)
            .and_then(|s| s.settings.get(&attr).copied())
    }

    pub fn style_state(&self, style: &str, attr: Attr, state: StyleState) -> Option<Color> {
        self.styles.get(style).and_then(|s| {
            s.maps.get(&attr).and_then(|states| {
                states
                    .iter()
                    .find(|(st, _)| *st == state)
                    .map(|(_, color)| *color)
            })
        })
    }

    pub fn menu_entry_color(&self, menu: MenuId, index: usize, attr: Attr) -> Option<Color> {
        self.menus
            .get(menu)
            .and_then(|m| m.entries.get(index))
            .and_then(|entry| entry.get(&attr).copied())
    }

    pub fn menu_color(&self, menu: MenuId, attr: Attr) -> Option<Color> {
        self.menus.get(menu).and_then(|m| m.attrs.get(&attr).copied())
    }

    // ---- internals ----

    fn mutate(&mut self) -> Result<()> {
        if let Some(limit) = self.destroy_after {
            if self.mutations >= limit {
                return Err(ToolkitError::WidgetDestroyed);
            }
        }
        self.mutations += 1;
        Ok(())
    }

    fn window(&self, window: WindowId) -> Result<&FakeWindow> {
        match self.windows.get(window) {
            Some(win) if !win.destroyed => Ok(win),
            _ => Err(ToolkitError::WidgetDestroyed),
        }
    }

    fn window_mut(&mut self, window: WindowId) -> Result<&mut FakeWindow> {
        match self.windows.get_mut(window) {
            Some(win) if !win.destroyed => Ok(win),
            _ => Err(ToolkitError::WidgetDestroyed),
        }
    }

    fn widget(&self, widget: WidgetId) -> Result<&FakeWidget> {
        match self.widgets.get(widget) {
            Some(w) if !w.destroyed => Ok(w),
            _ => Err(ToolkitError::WidgetDestroyed),
        }
    }

    fn frame(&self, frame: FrameId) -> Result<&FakeFrame> {
        match self.frames.get(frame) {
            Some(f) if !f.destroyed => Ok(f),
            _ => Err(ToolkitError::WidgetDestroyed),
        }
    }

    fn menu(&self, menu: MenuId) -> Result<&FakeMenu> {
        match self.menus.get(menu) {
            Some(m) if !m.destroyed => Ok(m),
            _ => Err(ToolkitError::WidgetDestroyed),
        }
    }
}

impl Toolkit for FakeToolkit {
    fn current_theme(&self) -> String {
        self.current_theme.clone()
    }

    fn set_current_theme(&mut self, name: &str) {
        self.current_theme = name.to_owned();
    }

    fn window_widgets(&self, window: WindowId) -> Result<Vec<WidgetId>> {
        Ok(self.window(window)?.widgets.clone())
    }

    fn window_background(&self, window: WindowId) -> Result<Color> {
        Ok(self.window(window)?.background)
    }

    fn window_set_background(&mut self, window: WindowId, color: Color) -> Result<()> {
        self.window(window)?;
        self.mutate()?;
        self.window_mut(window)?.background = color;
        Ok(())
    }

    fn window_default(&self, attr: Attr) -> Result<Color> {
        let _ = attr;
        Ok(FALLBACK_DEFAULT)
    }

    fn window_refresh(&mut self, window: WindowId) -> Result<()> {
        self.window_mut(window)?.refreshes += 1;
        Ok(())
    }

    fn window_transparency_key(&self, window: WindowId) -> Result<Option<Color>> {
        Ok(self.window(window)?.transparency_key)
    }

    fn window_set_transparency_key(
        &mut self,
        window: WindowId,
        key: Option<Color>,
    ) -> Result<()> {
        self.window_mut(window)?.transparency_key = key;
        Ok(())
    }

    fn widget_info(&self, widget: WidgetId) -> Result<WidgetInfo> {
        Ok(self.widget(widget)?.info.clone())
    }

    fn widget_accepts(&self, widget: WidgetId, attr: Attr) -> Result<bool> {
        Ok(self.widget(widget)?.accepts.contains(&attr))
    }

    fn widget_attr(&self, widget: WidgetId, attr: Attr) -> Result<Option<Color>> {
        Ok(self.widget(widget)?.attrs.get(&attr).copied())
    }

    fn widget_configure(&mut self, widget: WidgetId, attr: Attr, color: Color) -> Result<()> {
        self.widget(widget)?;
        self.mutate()?;
        let w = self
            .widgets
            .get_mut(widget)
            .ok_or(ToolkitError::WidgetDestroyed)?;
        w.attrs.insert(attr, color);
        w.accepts.insert(attr);
        w.mutations += 1;
        Ok(())
    }

    fn widget_default(&self, kind: WidgetKind, attr: Attr) -> Result<Color> {
        Ok(self
            .widget_defaults
            .get(&(kind, attr))
            .copied()
            .unwrap_or(FALLBACK_DEFAULT))
    }

    fn frame_attr(&self, frame: FrameId, attr: Attr) -> Result<Option<Color>> {
        let f = self.frame(frame)?;
        Ok(match attr {
            Attr::Background => f.background,
            _ => None,
        })
    }

    fn frame_configure(&mut self, frame: FrameId, attr: Attr, color: Color) -> Result<()> {
        self.frame(frame)?;
        self.mutate()?;
        let f = self
            .frames
            .get_mut(frame)
            .ok_or(ToolkitError::WidgetDestroyed)?;
        if attr == Attr::Background {
            f.background = Some(color);
        }
        f.mutations += 1;
        Ok(())
    }

    fn frame_default(&self, attr: Attr) -> Result<Color> {
        let _ = attr;
        Ok(FALLBACK_DEFAULT)
    }

    fn frame_contains(&self, frame: FrameId, widget: WidgetId) -> Result<bool> {
        Ok(self.frame(frame)?.members.contains(&widget))
    }

    fn menu_len(&self, menu: MenuId) -> Result<usize> {
        Ok(self.menu(menu)?.entries.len())
    }

    fn menu_configure(&mut self, menu: MenuId, attr: Attr, color: Color) -> Result<()> {
        self.menu(menu)?;
        self.mutate()?;
        let m = self
            .menus
            .get_mut(menu)
            .ok_or(ToolkitError::WidgetDestroyed)?;
        m.attrs.insert(attr, color);
        Ok(())
    }

    fn menu_entry_accepts(&self, menu: MenuId, index: usize, attr: Attr) -> Result<bool> {
        let m = self.menu(menu)?;
        if index >= m.entries.len() {
            return Ok(false);
        }
        Ok(m.entry_accepts.is_empty() || m.entry_accepts.contains(&attr))
    }

    fn menu_entry_configure(
        &mut self,
        menu: MenuId,
        index: usize,
        attr: Attr,
        color: Color,
    ) -> Result<()> {
        self.menu(menu)?;
        self.mutate()?;
        let m = self
            .menus
            .get_mut(menu)
            .ok_or(ToolkitError::WidgetDestroyed)?;
        if let Some(entry) = m.entries.get_mut(index) {
            entry.insert(attr, color);
        }
        Ok(())
    }

    fn submenus(&self, menu: MenuId) -> Result<Vec<MenuId>> {
        Ok(self.menu(menu)?.submenus.clone())
    }

    fn menu_default(&self, attr: Attr) -> Result<Color> {
        let _ = attr;
        Ok(FALLBACK_DEFAULT)
    }

    fn style_configure(&mut self, style: &str, attr: Attr, color: Color) -> Result<()> {
        self.mutate()?;
        self.styles
            .entry(style.to_owned())
            .or_default()
            .settings
            .insert(attr, color);
        Ok(())
    }

    fn style_map(
        &mut self,
        style: &str,
        attr: Attr,
        states: &[(StyleState, Color)],
    ) -> Result<()> {
        self.mutate()?;
        self.styles
            .entry(style.to_owned())
            .or_default()
            .maps
            .insert(attr, states.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destroyed_windows_fail_widget_access() {
        let mut tk = FakeToolkit::new("light-gray");
        let window = tk.add_window();
        let widget = tk.add_widget(window, WidgetSpec::new(WidgetKind::Text));
        tk.destroy_window(window);
        assert_eq!(
            tk.widget_info(widget).unwrap_err(),
            ToolkitError::WidgetDestroyed
        );
        assert_eq!(
            tk.window_widgets(window).unwrap_err(),
            ToolkitError::WidgetDestroyed
        );
    }

    #[test]
    fn mutation_budget_trips_mid_pass() {
        let mut tk = FakeToolkit::new("light-gray");
        let window = tk.add_window();
        let widget = tk.add_widget(window, WidgetSpec::new(WidgetKind::Text));
        tk.destroy_after(1);
        assert!(tk
            .widget_configure(widget, Attr::Background, Color::BLACK)
            .is_ok());
        assert_eq!(
            tk.widget_configure(widget, Attr::Background, Color::BLACK)
                .unwrap_err(),
            ToolkitError::WidgetDestroyed
        );
    }

    #[test]
    fn mutations_are_counted_per_widget_and_in_total() {
        let mut tk = FakeToolkit::new("light-gray");
        let window = tk.add_window();
        let widget = tk.add_widget(window, WidgetSpec::new(WidgetKind::Text));
        tk.widget_configure(widget, Attr::Background, Color::BLACK)
            .unwrap();
        tk.widget_configure(widget, Attr::Foreground, Color::WHITE)
            .unwrap();
        assert_eq!(tk.widget_mutations(widget), 2);
        assert_eq!(tk.total_mutations(), 2);
    }
}
