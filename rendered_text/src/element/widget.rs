// Copyright 2026 the Rendered Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::{object_origin, LineBox, PositionedGlyph};
use crate::format::{Padding, VerticalFormatting};
use crate::resources::{ChildWidget, HostWindow};
use alloc::string::String;
use alloc::sync::{Arc, Weak};

/// Placeholder for a child widget laid out inline with text.
///
/// The widget is resolved by name against the host window when metrics are
/// updated. Only a weak reference is kept, so a destroyed child simply
/// disconnects and collapses to zero size.
#[derive(Clone, Debug)]
pub struct WidgetElement {
    /// Name of the child widget.
    pub name: String,
    /// Space around the widget.
    pub padding: Padding,
    /// Placement inside a taller line.
    pub vertical_formatting: VerticalFormatting,
    widget: Option<Weak<dyn ChildWidget>>,
    size: (f32, f32),
}

impl WidgetElement {
    /// An unresolved placeholder for the child called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            padding: Padding::default(),
            vertical_formatting: VerticalFormatting::default(),
            widget: None,
            size: (0., 0.),
        }
    }

    /// The resolved child, if it is still alive.
    pub fn widget(&self) -> Option<Arc<dyn ChildWidget>> {
        self.widget.as_ref().and_then(Weak::upgrade)
    }

    /// Size of the child at the last metrics update.
    pub fn effective_size(&self) -> (f32, f32) {
        self.size
    }

    pub(crate) fn height(&self) -> f32 {
        self.size.1 + self.padding.height()
    }

    pub(crate) fn update_metrics(&mut self, host: Option<&dyn HostWindow>) -> (f32, f32) {
        if self.widget.is_some() && self.widget().is_none() {
            log::debug!("child widget '{}' was destroyed, disconnecting", self.name);
            self.widget = None;
        }
        if self.widget.is_none() {
            if let Some(child) = host.and_then(|host| host.find_child(&self.name)) {
                self.widget = Some(Arc::downgrade(&child));
            }
        }

        #[expect(
            clippy::cast_possible_truncation,
            reason = "layout works in f32; widget sizes are far below f32 precision limits"
        )]
        let size = self.widget().map_or((0., 0.), |widget| {
            let size = widget.pixel_size();
            (size.width as f32, size.height as f32)
        });
        let delta = (size.0 - self.size.0, size.1 - self.size.1);
        self.size = size;
        delta
    }

    /// Moves the live child to the pen position of each placeholder glyph.
    pub(crate) fn place(&self, run: &[PositionedGlyph<'_>], line: LineBox) {
        let Some(widget) = self.widget() else {
            return;
        };
        let top = match self.vertical_formatting {
            VerticalFormatting::Centre => line.top + (line.height - self.height()) * 0.5,
            VerticalFormatting::Bottom => line.top + line.height - self.height(),
            _ => line.top,
        } + self.padding.top;
        for positioned in run {
            widget.set_position(object_origin(positioned, top));
        }
    }
}
