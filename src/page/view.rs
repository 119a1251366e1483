use std::collections::BTreeMap;

use gpui::{
    AnyElement, App, AppContext, ClickEvent, Context, Entity, FontWeight, InteractiveElement,
    IntoElement, ParentElement, Render, SharedString, StatefulInteractiveElement, Styled,
    Subscription, Window, div, prelude::FluentBuilder as _, px, rgb,
};

use crate::form::{FieldLens, FormModel, FormResult, RowId};
use crate::signup::{
    SignupController, SignupDraft, SubmissionPreview, TechEntryDraft, signup_controller,
};

use super::editor::InputKind;
use super::palette;
use super::text_field::{TextField, TextFieldEvent};
use super::view_model::{
    ADD_TECH_LABEL, EMAIL_LABEL, FieldView, NAME_LABEL, PASSWORD_LABEL, SUBMIT_LABEL, SignupView,
    TECHS_LABEL,
};

const FORM_MAX_WIDTH: f32 = 320.0;

/// Which slot of the draft an input writes to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Binding {
    Name,
    Email,
    Password,
    TechTitle(RowId),
    TechKnowledge(RowId),
}

struct TechRowInputs {
    title: Entity<TextField>,
    knowledge: Entity<TextField>,
}

/// The signup page. Inputs for technology rows are created once per row
/// identity, so focus and typed text stay with their row.
pub struct SignupPage {
    controller: SignupController,
    preview: SubmissionPreview,
    name: Entity<TextField>,
    email: Entity<TextField>,
    password: Entity<TextField>,
    rows: BTreeMap<RowId, TechRowInputs>,
    subscriptions: Vec<Subscription>,
}

impl SignupPage {
    pub fn new(_window: &mut Window, cx: &mut Context<Self>) -> Self {
        let controller = signup_controller();
        let mut subscriptions = Vec::new();
        let name = Self::input(InputKind::Text, "", Binding::Name, &mut subscriptions, cx);
        let email = Self::input(InputKind::Email, "", Binding::Email, &mut subscriptions, cx);
        let password = Self::input(
            InputKind::Password,
            "",
            Binding::Password,
            &mut subscriptions,
            cx,
        );

        Self {
            controller,
            preview: SubmissionPreview::default(),
            name,
            email,
            password,
            rows: BTreeMap::new(),
            subscriptions,
        }
    }

    fn input(
        kind: InputKind,
        value: &str,
        binding: Binding,
        subscriptions: &mut Vec<Subscription>,
        cx: &mut Context<Self>,
    ) -> Entity<TextField> {
        let field = cx.new(|cx| TextField::new(kind, value, cx));
        subscriptions.push(cx.subscribe(
            &field,
            move |this, _field, event: &TextFieldEvent, cx| {
                this.on_field_event(binding, event, cx);
            },
        ));
        field
    }

    fn on_field_event(&mut self, binding: Binding, event: &TextFieldEvent, cx: &mut Context<Self>) {
        let result = match event {
            TextFieldEvent::Changed(value) => self.write(binding, value.clone()),
            TextFieldEvent::Blurred => self.touch(binding),
            TextFieldEvent::Submitted => self.submit().map(|_| ()),
        };
        if let Err(error) = result {
            tracing::error!(%error, ?binding, "signup form update failed");
        }
        cx.notify();
    }

    fn write(&self, binding: Binding, value: String) -> FormResult<()> {
        let fields = SignupDraft::fields();
        let row_fields = TechEntryDraft::fields();
        match binding {
            Binding::Name => self.controller.set(fields.name(), value),
            Binding::Email => self.controller.set(fields.email(), value),
            Binding::Password => self.controller.set(fields.password(), value),
            Binding::TechTitle(row) => {
                self.controller
                    .set_row(fields.techs(), row, row_fields.title(), value)
            }
            Binding::TechKnowledge(row) => {
                self.controller
                    .set_row(fields.techs(), row, row_fields.knowledge(), value)
            }
        }
    }

    fn touch(&self, binding: Binding) -> FormResult<()> {
        let fields = SignupDraft::fields();
        let row_fields = TechEntryDraft::fields();
        match binding {
            Binding::Name => self.controller.touch(fields.name()),
            Binding::Email => self.controller.touch(fields.email()),
            Binding::Password => self.controller.touch(fields.password()),
            Binding::TechTitle(row) => {
                self.controller
                    .touch_row(fields.techs(), row, row_fields.title())
            }
            Binding::TechKnowledge(row) => {
                self.controller
                    .touch_row(fields.techs(), row, row_fields.knowledge())
            }
        }
    }

    fn submit(&mut self) -> FormResult<bool> {
        let mut accepted = None;
        let valid = self.controller.submit(|submission| {
            accepted = Some((
                SubmissionPreview::render(submission)?,
                submission.techs.len(),
            ));
            Ok(())
        })?;
        if let Some((preview, techs)) = accepted {
            tracing::info!(techs, "signup submission accepted");
            self.preview = preview;
        }
        Ok(valid)
    }

    fn add_tech(&mut self, _: &ClickEvent, _window: &mut Window, cx: &mut Context<Self>) {
        let entry = TechEntryDraft::default();
        let knowledge = entry.knowledge.clone();
        match self.controller.append(SignupDraft::fields().techs(), entry) {
            Ok(row) => {
                let title = Self::input(
                    InputKind::Text,
                    "",
                    Binding::TechTitle(row),
                    &mut self.subscriptions,
                    cx,
                );
                let knowledge = Self::input(
                    InputKind::Number,
                    &knowledge,
                    Binding::TechKnowledge(row),
                    &mut self.subscriptions,
                    cx,
                );
                self.rows.insert(row, TechRowInputs { title, knowledge });
            }
            Err(error) => tracing::error!(%error, "failed to add technology row"),
        }
        cx.notify();
    }

    fn on_submit_click(&mut self, _: &ClickEvent, _window: &mut Window, cx: &mut Context<Self>) {
        if let Err(error) = self.submit() {
            tracing::error!(%error, "signup submit failed");
        }
        cx.notify();
    }

    fn render_form(
        &self,
        view: &SignupView,
        window: &Window,
        cx: &mut Context<Self>,
    ) -> AnyElement {
        let rows = view
            .techs
            .iter()
            .filter_map(|row| {
                let inputs = self.rows.get(&row.id)?;
                Some(
                    div()
                        .flex()
                        .gap_2()
                        .child(div().flex_1().child(framed_input(
                            &inputs.title,
                            &row.title,
                            window,
                            cx,
                        )))
                        .child(div().w_16().child(framed_input(
                            &inputs.knowledge,
                            &row.knowledge,
                            window,
                            cx,
                        ))),
                )
            })
            .collect::<Vec<_>>();

        div()
            .flex()
            .flex_col()
            .gap_4()
            .w_full()
            .max_w(px(FORM_MAX_WIDTH))
            .child(labeled(NAME_LABEL, framed_input(&self.name, &view.name, window, cx)))
            .child(labeled(
                EMAIL_LABEL,
                framed_input(&self.email, &view.email, window, cx),
            ))
            .child(labeled(
                PASSWORD_LABEL,
                framed_input(&self.password, &view.password, window, cx),
            ))
            .child(
                div()
                    .flex()
                    .flex_col()
                    .gap_1()
                    .font_weight(FontWeight::SEMIBOLD)
                    .child(
                        div()
                            .flex()
                            .items_center()
                            .justify_between()
                            .child(TECHS_LABEL)
                            .child(
                                div()
                                    .id("add-tech")
                                    .text_sm()
                                    .text_color(rgb(palette::EMERALD_500))
                                    .cursor_pointer()
                                    .child(ADD_TECH_LABEL)
                                    .on_click(cx.listener(Self::add_tech)),
                            ),
                    )
                    .children(rows)
                    .when_some(view.techs_error.clone(), |this, error| {
                        this.child(error_text(error))
                    }),
            )
            .child(
                div()
                    .id("submit")
                    .flex()
                    .justify_center()
                    .p_2()
                    .rounded_md()
                    .bg(rgb(palette::EMERALD_500))
                    .text_color(rgb(palette::WHITE))
                    .font_weight(FontWeight::SEMIBOLD)
                    .cursor_pointer()
                    .child(SUBMIT_LABEL)
                    .on_click(cx.listener(Self::on_submit_click)),
            )
            .into_any_element()
    }
}

impl Render for SignupPage {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let view = match SignupView::from_controller(&self.controller, &self.preview) {
            Ok(view) => view,
            Err(error) => {
                tracing::error!(%error, "failed to read signup form state");
                return div()
                    .size_full()
                    .bg(rgb(palette::ZINC_950))
                    .text_color(rgb(palette::RED_500))
                    .child(SharedString::from(error.to_string()))
                    .into_any_element();
            }
        };

        let preview = view.preview.clone().map(|preview| {
            div()
                .font_family("monospace")
                .text_sm()
                .flex()
                .flex_col()
                .children(
                    preview
                        .lines()
                        .map(|line| {
                            div()
                                .whitespace_nowrap()
                                .child(SharedString::from(line.to_string()))
                        })
                        .collect::<Vec<_>>(),
                )
        });

        div()
            .id("signup-page")
            .size_full()
            .overflow_y_scroll()
            .bg(rgb(palette::ZINC_950))
            .text_color(rgb(palette::ZINC_300))
            .flex()
            .flex_col()
            .gap_10()
            .items_center()
            .justify_center()
            .py_10()
            .child(self.render_form(&view, window, cx))
            .children(preview)
            .into_any_element()
    }
}

fn labeled(label: &'static str, input: impl IntoElement) -> impl IntoElement {
    div()
        .flex()
        .flex_col()
        .gap_1()
        .font_weight(FontWeight::SEMIBOLD)
        .child(label)
        .child(input)
}

/// Input box with its inline error underneath.
fn framed_input(
    field: &Entity<TextField>,
    view: &FieldView,
    window: &Window,
    cx: &App,
) -> impl IntoElement {
    let border = if view.error.is_some() {
        palette::RED_500
    } else if field.read(cx).is_focused(window) {
        palette::EMERALD_500
    } else {
        palette::ZINC_600
    };

    div()
        .flex()
        .flex_col()
        .gap_1()
        .child(
            div()
                .h_10()
                .rounded_md()
                .border_1()
                .border_color(rgb(border))
                .bg(rgb(palette::ZINC_900))
                .shadow_sm()
                .child(field.clone()),
        )
        .when_some(view.error.clone(), |this, error| this.child(error_text(error)))
}

fn error_text(message: String) -> impl IntoElement {
    div()
        .text_sm()
        .text_color(rgb(palette::RED_500))
        .child(SharedString::from(message))
}
