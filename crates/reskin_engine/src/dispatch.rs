//! Widget dispatch: per-kind role→attribute application over a live tree.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use reskin_color::Color;
use reskin_theme::{toggle_indicator, PaletteTransition, RoleKey};
use reskin_toolkit::{
    Attr, FrameId, MenuId, StyleState, Toolkit, WidgetId, WidgetInfo, WidgetKind, WindowId,
};

use crate::honor::HonorLedger;
use crate::options::{ReskinOptions, WidgetFilter};
use crate::ReskinError;

/// Whether option-menu menus also get their active colors inverted.
const ALTER_MENU_ACTIVE_COLORS: bool = true;

/// Entry colors applied while walking a menu tree.
const MENU_ENTRY_COLORS: &[(Attr, RoleKey)] = &[
    (Attr::Foreground, RoleKey::TextInput),
    (Attr::Background, RoleKey::Input),
    (Attr::ActiveForeground, RoleKey::Input),
    (Attr::ActiveBackground, RoleKey::TextInput),
];

// Scrollbar part roles.
const SCROLLBAR_TROUGH: RoleKey = RoleKey::Scroll;
const SCROLLBAR_FRAME: RoleKey = RoleKey::Background;
const SCROLLBAR_THUMB: RoleKey = RoleKey::ButtonFill;
const SCROLLBAR_ARROW: RoleKey = RoleKey::ButtonText;

/// One restyle pass over a window at a fixed progress.
pub(crate) struct Dispatcher<'a, T: Toolkit> {
    tk: &'a mut T,
    window: WindowId,
    tr: &'a PaletteTransition,
    opts: &'a ReskinOptions,
    ledger: &'a mut HonorLedger,
}

impl<'a, T: Toolkit> Dispatcher<'a, T> {
    pub(crate) fn new(
        tk: &'a mut T,
        window: WindowId,
        tr: &'a PaletteTransition,
        opts: &'a ReskinOptions,
        ledger: &'a mut HonorLedger,
    ) -> Self {
        Self {
            tk,
            window,
            tr,
            opts,
            ledger,
        }
    }

    /// Apply the transition to every participating widget, then trigger
    /// exactly one window refresh.
    pub(crate) fn run(&mut self) -> Result<(), ReskinError> {
        let filter = WidgetFilter::from_options(self.opts)?;

        if self.opts.reskin_background {
            let color = self.tr.resolve(RoleKey::Background, || {
                self.tk
                    .window_default(Attr::Background)
                    .map_err(ReskinError::from)
            })?;
            self.tk.window_set_background(self.window, color)?;
        }

        // The first container enclosing the title bar, once seen; later
        // widgets inside it are title bar elements even without the marker.
        let mut titlebar_frame: Option<FrameId> = None;

        for widget in self.tk.window_widgets(self.window)? {
            let info = self.tk.widget_info(widget)?;
            if !filter.admits(info.tag.as_deref()) {
                continue;
            }
            self.apply_widget(widget, &info, &mut titlebar_frame)?;
        }

        self.tk.window_refresh(self.window)?;
        Ok(())
    }

    fn apply_widget(
        &mut self,
        widget: WidgetId,
        info: &WidgetInfo,
        titlebar_frame: &mut Option<FrameId>,
    ) -> Result<(), ReskinError> {
        // Generic tweaks.
        if let Some(frame) = info.row_frame {
            if !info.titlebar {
                self.frame_set(frame, &[(Attr::Background, RoleKey::Background)])?;
            }
        }
        if self.tk.widget_accepts(widget, Attr::Background)?
            && self.tk.widget_attr(widget, Attr::Background)?.is_some()
            && self.honors(widget, info.kind, Attr::Background, RoleKey::Background)?
        {
            self.widget_set(widget, info.kind, &[(Attr::Background, RoleKey::Background)])?;
        }

        if let Some(menu) = info.right_click_menu {
            self.restyle_menu(menu)?;
        }

        if let Some(style) = info.vertical_scrollbar_style.as_deref() {
            self.scrollbar_style(style)?;
        }
        if let Some(style) = info.horizontal_scrollbar_style.as_deref() {
            self.scrollbar_style(style)?;
        }

        // Custom title bar marker.
        if info.titlebar {
            self.widget_set(widget, info.kind, &[(Attr::Background, RoleKey::ButtonFill)])?;
            if let Some(frame) = info.row_frame {
                self.frame_set(frame, &[(Attr::Background, RoleKey::ButtonFill)])?;
                *titlebar_frame = Some(frame);
            }
            return Ok(());
        }

        // Title bar elements: siblings living under the marker's frame.
        if let Some(tb) = *titlebar_frame {
            if info.row_frame == Some(tb) || self.tk.frame_contains(tb, widget)? {
                if let Some(frame) = info.row_frame {
                    self.frame_set(frame, &[(Attr::Background, RoleKey::ButtonFill)])?;
                }
                self.widget_set(widget, info.kind, &[(Attr::Background, RoleKey::ButtonFill)])?;
                if self.tk.widget_accepts(widget, Attr::Foreground)? {
                    self.widget_set(
                        widget,
                        info.kind,
                        &[(Attr::Foreground, RoleKey::ButtonText)],
                    )?;
                }
                return Ok(());
            }
        }

        self.apply_kind(widget, info)
    }

    /// The per-kind role→attribute mapping table.
    fn apply_kind(&mut self, widget: WidgetId, info: &WidgetInfo) -> Result<(), ReskinError> {
        let kind = info.kind;
        match kind {
            WidgetKind::Button => {
                if let Some(style) = info.style.as_deref() {
                    self.style_set(
                        style,
                        kind,
                        &[
                            (Attr::Background, RoleKey::ButtonFill),
                            (Attr::Foreground, RoleKey::ButtonText),
                        ],
                    )?;
                    self.style_map(
                        style,
                        kind,
                        Attr::Background,
                        &[
                            (StyleState::Pressed, RoleKey::ButtonText),
                            (StyleState::Active, RoleKey::ButtonText),
                        ],
                    )?;
                    self.style_map(
                        style,
                        kind,
                        Attr::Foreground,
                        &[
                            (StyleState::Pressed, RoleKey::ButtonFill),
                            (StyleState::Active, RoleKey::ButtonFill),
                        ],
                    )?;
                } else {
                    self.widget_set(
                        widget,
                        kind,
                        &[
                            (Attr::Background, RoleKey::ButtonFill),
                            (Attr::Foreground, RoleKey::ButtonText),
                            (Attr::ActiveBackground, RoleKey::ButtonText),
                            (Attr::ActiveForeground, RoleKey::ButtonFill),
                        ],
                    )?;
                }
            }

            WidgetKind::ButtonMenu => {
                self.widget_set(
                    widget,
                    kind,
                    &[
                        (Attr::Background, RoleKey::ButtonFill),
                        (Attr::Foreground, RoleKey::ButtonText),
                    ],
                )?;
                if let Some(menu) = info.menu {
                    self.restyle_menu(menu)?;
                }
            }

            WidgetKind::Canvas => {
                self.widget_set(
                    widget,
                    kind,
                    &[(Attr::HighlightBackground, RoleKey::Background)],
                )?;
            }

            WidgetKind::Column => {
                // Scrollable containers carry an outer frame plus the
                // content frame nested inside the scroll canvas.
                if let Some(frame) = info.column_frame {
                    self.frame_set(frame, &[(Attr::Background, RoleKey::Background)])?;
                }
                if let Some(frame) = info.column_body {
                    self.frame_set(frame, &[(Attr::Background, RoleKey::Background)])?;
                }
            }

            WidgetKind::Combo => self.combo(widget, info)?,

            WidgetKind::Frame => {
                self.widget_set(widget, kind, &[(Attr::Foreground, RoleKey::Text)])?;
            }

            WidgetKind::Listbox => {
                self.widget_set(
                    widget,
                    kind,
                    &[
                        (Attr::Foreground, RoleKey::TextInput),
                        (Attr::Background, RoleKey::Input),
                        (Attr::SelectForeground, RoleKey::Input),
                        (Attr::SelectBackground, RoleKey::TextInput),
                    ],
                )?;
            }

            WidgetKind::Menu => {
                if let Some(menu) = info.menu {
                    self.restyle_menu(menu)?;
                }
            }

            WidgetKind::OptionMenu => {
                if let Some(menu) = info.menu {
                    self.menu_set(
                        menu,
                        &[
                            (Attr::Foreground, RoleKey::TextInput),
                            (Attr::Background, RoleKey::Input),
                        ],
                    )?;
                    if ALTER_MENU_ACTIVE_COLORS {
                        self.menu_set(
                            menu,
                            &[
                                (Attr::ActiveForeground, RoleKey::Input),
                                (Attr::ActiveBackground, RoleKey::TextInput),
                            ],
                        )?;
                    }
                }
                self.widget_set(
                    widget,
                    kind,
                    &[
                        (Attr::Foreground, RoleKey::TextInput),
                        (Attr::Background, RoleKey::Input),
                    ],
                )?;
            }

            WidgetKind::ProgressBar => {
                if let Some(style) = info.style.as_deref() {
                    self.style_set(
                        style,
                        kind,
                        &[
                            (Attr::Background, RoleKey::ProgressBar),
                            (Attr::TroughColor, RoleKey::ProgressTrough),
                        ],
                    )?;
                }
            }

            WidgetKind::Sizegrip => {
                if let Some(style) = info.style.as_deref() {
                    self.style_set(style, kind, &[(Attr::Background, RoleKey::Background)])?;
                }
            }

            WidgetKind::Slider => {
                self.widget_set(
                    widget,
                    kind,
                    &[
                        (Attr::Foreground, RoleKey::Text),
                        (Attr::TroughColor, RoleKey::Scroll),
                    ],
                )?;
            }

            WidgetKind::Spin => {
                self.widget_set(
                    widget,
                    kind,
                    &[
                        (Attr::Background, RoleKey::Input),
                        (Attr::Foreground, RoleKey::TextInput),
                        (Attr::ButtonBackground, RoleKey::Input),
                    ],
                )?;
            }

            WidgetKind::TabGroup => {
                if let Some(style) = info.style.as_deref() {
                    self.style_set(style, kind, &[(Attr::Background, RoleKey::Background)])?;
                    let tab_style = format!("{style}.Tab");
                    self.style_set(
                        &tab_style,
                        kind,
                        &[
                            (Attr::Background, RoleKey::Input),
                            (Attr::Foreground, RoleKey::TextInput),
                        ],
                    )?;
                    self.style_map(
                        &tab_style,
                        kind,
                        Attr::Foreground,
                        &[
                            (StyleState::Pressed, RoleKey::ButtonFill),
                            (StyleState::Selected, RoleKey::Text),
                        ],
                    )?;
                    self.style_map(
                        &tab_style,
                        kind,
                        Attr::Background,
                        &[
                            (StyleState::Pressed, RoleKey::ButtonText),
                            (StyleState::Selected, RoleKey::Background),
                        ],
                    )?;
                }
            }

            WidgetKind::Checkbox | WidgetKind::Radio => {
                self.checkbox_or_radio(widget, kind)?;
            }

            WidgetKind::HorizontalSeparator | WidgetKind::VerticalSeparator => {
                if let Some(style) = info.style.as_deref() {
                    self.style_set(style, kind, &[(Attr::Background, RoleKey::Background)])?;
                }
            }

            WidgetKind::Input | WidgetKind::Multiline => {
                self.widget_set(
                    widget,
                    kind,
                    &[
                        (Attr::Foreground, RoleKey::TextInput),
                        (Attr::Background, RoleKey::Input),
                        (Attr::SelectForeground, RoleKey::Input),
                        (Attr::SelectBackground, RoleKey::TextInput),
                        (Attr::InsertBackground, RoleKey::TextInput),
                    ],
                )?;
            }

            WidgetKind::StatusBar | WidgetKind::Text => {
                if self.honors(widget, kind, Attr::Background, RoleKey::Background)? {
                    self.widget_set(widget, kind, &[(Attr::Background, RoleKey::Background)])?;
                }
                if self.honors(widget, kind, Attr::Foreground, RoleKey::Text)? {
                    self.widget_set(widget, kind, &[(Attr::Foreground, RoleKey::Text)])?;
                }
            }

            WidgetKind::Table | WidgetKind::Tree => self.table_or_tree(info, kind)?,

            WidgetKind::Scrollbar | WidgetKind::Other => {}
        }
        Ok(())
    }

    // ---- kind-specific helpers ----

    fn combo(&mut self, _widget: WidgetId, info: &WidgetInfo) -> Result<(), ReskinError> {
        // The popdown listbox is a separate widget from the combo's
        // visible field.
        if let Some(popdown) = info.popdown {
            self.widget_set(
                popdown,
                WidgetKind::Listbox,
                &[
                    (Attr::Background, RoleKey::Input),
                    (Attr::Foreground, RoleKey::TextInput),
                    (Attr::SelectForeground, RoleKey::Input),
                    (Attr::SelectBackground, RoleKey::TextInput),
                ],
            )?;
        }
        if let Some(style) = info.style.as_deref() {
            self.style_set(
                style,
                WidgetKind::Combo,
                &[
                    (Attr::SelectForeground, RoleKey::TextInput),
                    (Attr::SelectBackground, RoleKey::Input),
                    (Attr::SelectColor, RoleKey::TextInput),
                    (Attr::Foreground, RoleKey::TextInput),
                    (Attr::Background, RoleKey::ButtonFill),
                    (Attr::ArrowColor, RoleKey::ButtonText),
                ],
            )?;
            self.style_map(
                style,
                WidgetKind::Combo,
                Attr::Foreground,
                &[(StyleState::Readonly, RoleKey::TextInput)],
            )?;
            self.style_map(
                style,
                WidgetKind::Combo,
                Attr::FieldBackground,
                &[(StyleState::Readonly, RoleKey::Input)],
            )?;
        }
        Ok(())
    }

    fn checkbox_or_radio(&mut self, widget: WidgetId, kind: WidgetKind) -> Result<(), ReskinError> {
        // The toggle indicator is derived from the interpolated background
        // and text colors, so it has to be recomputed every frame.
        let background = self.tr.resolve(RoleKey::Background, || {
            self.tk
                .widget_default(kind, Attr::SelectColor)
                .map_err(ReskinError::from)
        })?;
        let text = self.tr.resolve(RoleKey::Text, || {
            self.tk
                .widget_default(kind, Attr::SelectColor)
                .map_err(ReskinError::from)
        })?;
        let toggle = toggle_indicator(background, text);
        self.tk.widget_configure(widget, Attr::SelectColor, toggle)?;

        self.widget_set(
            widget,
            kind,
            &[
                (Attr::Background, RoleKey::Background),
                (Attr::Foreground, RoleKey::Text),
                (Attr::ActiveBackground, RoleKey::Background),
            ],
        )
    }

    fn table_or_tree(&mut self, info: &WidgetInfo, kind: WidgetKind) -> Result<(), ReskinError> {
        let Some(style) = info.style.as_deref() else {
            return Ok(());
        };
        self.style_set(
            style,
            kind,
            &[
                (Attr::Foreground, RoleKey::Text),
                (Attr::Background, RoleKey::Background),
                (Attr::FieldBackground, RoleKey::Background),
                (Attr::FieldColor, RoleKey::Text),
            ],
        )?;
        self.style_map(
            style,
            kind,
            Attr::Foreground,
            &[(StyleState::Selected, RoleKey::ButtonText)],
        )?;
        self.style_map(
            style,
            kind,
            Attr::Background,
            &[(StyleState::Selected, RoleKey::ButtonFill)],
        )?;

        let heading = format!("{style}.Heading");
        self.style_set(
            &heading,
            kind,
            &[
                (Attr::Foreground, RoleKey::TextInput),
                (Attr::Background, RoleKey::Input),
            ],
        )?;
        // Tree headers take no active colors.
        if kind == WidgetKind::Table {
            self.style_map(
                &heading,
                kind,
                Attr::Foreground,
                &[(StyleState::Active, RoleKey::Input)],
            )?;
            self.style_map(
                &heading,
                kind,
                Attr::Background,
                &[(StyleState::Active, RoleKey::TextInput)],
            )?;
        }
        Ok(())
    }

    /// Worklist traversal over a menu and its submenus.
    ///
    /// The visited set guards against cyclic submenu links; menus with no
    /// entries terminate naturally.
    fn restyle_menu(&mut self, root: MenuId) -> Result<(), ReskinError> {
        let mut stack = vec![root];
        let mut seen: FxHashSet<MenuId> = FxHashSet::default();
        while let Some(menu) = stack.pop() {
            if !seen.insert(menu) {
                continue;
            }
            for index in 0..self.tk.menu_len(menu)? {
                for &(attr, role) in MENU_ENTRY_COLORS {
                    if !self.tk.menu_entry_accepts(menu, index, attr)? {
                        continue;
                    }
                    let color = self.tr.resolve(role, || {
                        self.tk.menu_default(attr).map_err(ReskinError::from)
                    })?;
                    self.tk.menu_entry_configure(menu, index, attr, color)?;
                }
            }
            stack.extend(self.tk.submenus(menu)?);
        }
        Ok(())
    }

    fn scrollbar_style(&mut self, style: &str) -> Result<(), ReskinError> {
        self.style_set(
            style,
            WidgetKind::Scrollbar,
            &[
                (Attr::TroughColor, SCROLLBAR_TROUGH),
                (Attr::FrameColor, SCROLLBAR_FRAME),
                (Attr::BorderColor, SCROLLBAR_FRAME),
            ],
        )?;
        self.style_map(
            style,
            WidgetKind::Scrollbar,
            Attr::Background,
            &[
                (StyleState::Selected, SCROLLBAR_THUMB),
                (StyleState::Active, SCROLLBAR_ARROW),
                (StyleState::Background, SCROLLBAR_THUMB),
                (StyleState::NotFocus, SCROLLBAR_THUMB),
            ],
        )?;
        self.style_map(
            style,
            WidgetKind::Scrollbar,
            Attr::ArrowColor,
            &[
                (StyleState::Selected, SCROLLBAR_ARROW),
                (StyleState::Active, SCROLLBAR_THUMB),
                (StyleState::Background, SCROLLBAR_THUMB),
                (StyleState::NotFocus, SCROLLBAR_ARROW),
            ],
        )?;
        Ok(())
    }

    // ---- resolution plumbing ----

    fn widget_set(
        &mut self,
        widget: WidgetId,
        kind: WidgetKind,
        configs: &[(Attr, RoleKey)],
    ) -> Result<(), ReskinError> {
        for &(attr, role) in configs {
            let color = self.tr.resolve(role, || {
                self.tk.widget_default(kind, attr).map_err(ReskinError::from)
            })?;
            self.tk.widget_configure(widget, attr, color)?;
        }
        Ok(())
    }

    fn frame_set(
        &mut self,
        frame: FrameId,
        configs: &[(Attr, RoleKey)],
    ) -> Result<(), ReskinError> {
        for &(attr, role) in configs {
            let color = self.tr.resolve(role, || {
                self.tk.frame_default(attr).map_err(ReskinError::from)
            })?;
            self.tk.frame_configure(frame, attr, color)?;
        }
        Ok(())
    }

    fn menu_set(&mut self, menu: MenuId, configs: &[(Attr, RoleKey)]) -> Result<(), ReskinError> {
        for &(attr, role) in configs {
            let color = self.tr.resolve(role, || {
                self.tk.menu_default(attr).map_err(ReskinError::from)
            })?;
            self.tk.menu_configure(menu, attr, color)?;
        }
        Ok(())
    }

    fn style_set(
        &mut self,
        style: &str,
        kind: WidgetKind,
        configs: &[(Attr, RoleKey)],
    ) -> Result<(), ReskinError> {
        for &(attr, role) in configs {
            let color = self.tr.resolve(role, || {
                self.tk.widget_default(kind, attr).map_err(ReskinError::from)
            })?;
            self.tk.style_configure(style, attr, color)?;
        }
        Ok(())
    }

    fn style_map(
        &mut self,
        style: &str,
        kind: WidgetKind,
        attr: Attr,
        states: &[(StyleState, RoleKey)],
    ) -> Result<(), ReskinError> {
        let mut resolved: SmallVec<[(StyleState, Color); 4]> = SmallVec::new();
        for &(state, role) in states {
            let color = self.tr.resolve(role, || {
                self.tk.widget_default(kind, attr).map_err(ReskinError::from)
            })?;
            resolved.push((state, color));
        }
        self.tk.style_map(style, attr, &resolved)?;
        Ok(())
    }

    /// Honor-previous check: overwrite only attributes still at the old
    /// theme's nominal value. Verdicts are pinned for the whole session so
    /// an animation's own writes cannot flip them. The comparison can
    /// misfire when a custom color coincides with the old theme's nominal
    /// one; that limitation is part of the policy.
    fn honors(
        &mut self,
        widget: WidgetId,
        kind: WidgetKind,
        attr: Attr,
        role: RoleKey,
    ) -> Result<bool, ReskinError> {
        if !self.opts.honor_previous {
            return Ok(true);
        }
        if let Some(verdict) = self.ledger.get(widget, attr) {
            return Ok(verdict);
        }
        let current = self.tk.widget_attr(widget, attr)?;
        let nominal = self.tr.resolve_old(role, || {
            self.tk.widget_default(kind, attr).map_err(ReskinError::from)
        })?;
        let verdict = current
            .map(|c| c.to_hex_string() == nominal.to_hex_string())
            .unwrap_or(false);
        self.ledger.record(widget, attr, verdict);
        Ok(verdict)
    }
}
