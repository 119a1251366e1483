use gpui::{
    App, Context, EventEmitter, FocusHandle, Focusable, InteractiveElement, IntoElement,
    KeyDownEvent, MouseButton, MouseDownEvent, ParentElement, Render, SharedString, Styled,
    Window, div, prelude::FluentBuilder as _, px, rgb,
};

use super::editor::{EditorState, InputKind};
use super::palette;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TextFieldEvent {
    Changed(String),
    Blurred,
    Submitted,
}

/// Focusable single-line input. It owns only the editing state; the value
/// of record lives in the form controller and arrives through `Changed`.
pub struct TextField {
    focus_handle: FocusHandle,
    editor: EditorState,
}

impl EventEmitter<TextFieldEvent> for TextField {}

impl TextField {
    pub fn new(kind: InputKind, value: impl Into<String>, cx: &mut Context<Self>) -> Self {
        Self {
            focus_handle: cx.focus_handle(),
            editor: EditorState::new(kind, value),
        }
    }

    pub fn is_focused(&self, window: &Window) -> bool {
        self.focus_handle.is_focused(window)
    }

    fn on_key_down(&mut self, event: &KeyDownEvent, _window: &mut Window, cx: &mut Context<Self>) {
        let keystroke = &event.keystroke;
        if keystroke.modifiers.control
            || keystroke.modifiers.platform
            || keystroke.modifiers.function
            || keystroke.modifiers.alt
        {
            return;
        }

        let changed = match keystroke.key.as_str() {
            "backspace" => self.editor.delete_backward(),
            "delete" => self.editor.delete_forward(),
            "left" => {
                self.editor.move_left();
                false
            }
            "right" => {
                self.editor.move_right();
                false
            }
            "home" => {
                self.editor.move_home();
                false
            }
            "end" => {
                self.editor.move_end();
                false
            }
            "enter" => {
                cx.emit(TextFieldEvent::Submitted);
                cx.stop_propagation();
                return;
            }
            "tab" | "escape" => return,
            _ => match keystroke.key_char.as_deref() {
                Some(text) => self.editor.insert_text(text),
                None => return,
            },
        };

        if changed {
            cx.emit(TextFieldEvent::Changed(self.editor.value().to_string()));
        }
        cx.stop_propagation();
        cx.notify();
    }

    fn on_mouse_down(&mut self, _: &MouseDownEvent, window: &mut Window, cx: &mut Context<Self>) {
        window.focus(&self.focus_handle);
        self.editor.move_end();
        cx.notify();
    }

    fn on_mouse_down_out(
        &mut self,
        _: &MouseDownEvent,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        if self.focus_handle.is_focused(window) {
            cx.emit(TextFieldEvent::Blurred);
            cx.notify();
        }
    }
}

impl Focusable for TextField {
    fn focus_handle(&self, _: &App) -> FocusHandle {
        self.focus_handle.clone()
    }
}

impl Render for TextField {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let focused = self.focus_handle.is_focused(window);
        let (before, after) = self.editor.display_parts();

        div()
            .track_focus(&self.focus_handle)
            .on_key_down(cx.listener(Self::on_key_down))
            .on_mouse_down(MouseButton::Left, cx.listener(Self::on_mouse_down))
            .on_mouse_down_out(cx.listener(Self::on_mouse_down_out))
            .size_full()
            .flex()
            .items_center()
            .px_3()
            .overflow_hidden()
            .whitespace_nowrap()
            .cursor_text()
            .child(SharedString::from(before))
            .when(focused, |this| {
                this.child(
                    div()
                        .w(px(1.5))
                        .h(px(18.0))
                        .bg(rgb(palette::ZINC_300)),
                )
            })
            .child(SharedString::from(after))
    }
}
