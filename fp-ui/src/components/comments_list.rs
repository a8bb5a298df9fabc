//! Session comments and the input to add one.

use dioxus::prelude::*;
use fp_core::Comment;

#[derive(Props, Clone, PartialEq)]
pub struct CommentsListProps {
    pub comments: Vec<Comment>,
    /// Current draft, owned by the sheet
    pub draft: String,
    pub on_draft: EventHandler<String>,
    pub on_submit: EventHandler<()>,
}

#[component]
pub fn CommentsList(props: CommentsListProps) -> Element {
    rsx! {
        div {
            style: "margin-top: 12px; padding: 0 16px 16px; display: flex; flex-direction: column; gap: 10px;",
            h3 { style: "margin: 0; font-size: 16px; color: #111827;", "Comentarios" }
            div {
                style: "display: flex; flex-direction: column; gap: 8px; max-height: 220px; overflow-y: auto;",
                for comment in props.comments.iter() {
                    div {
                        key: "{comment.id}",
                        style: "padding: 10px 12px; border-radius: 10px; background: #f9fafb; border: 1px solid #f1f5f9;",
                        div {
                            style: "display: flex; justify-content: space-between; margin-bottom: 4px;",
                            strong { style: "font-size: 13px; color: #111827;", "{comment.author}" }
                            span { style: "font-size: 11px; color: #6b7280;", "{comment.timestamp}" }
                        }
                        span { style: "font-size: 14px; color: #1f2937;", "{comment.text}" }
                    }
                }
            }
            form {
                style: "display: flex; gap: 8px;",
                onsubmit: move |evt: FormEvent| {
                    evt.prevent_default();
                    props.on_submit.call(());
                },
                input {
                    r#type: "text",
                    style: "flex: 1; padding: 10px 12px; border-radius: 10px; border: 1px solid #d1d5db; font-size: 14px;",
                    placeholder: "Adicione um comentario",
                    value: "{props.draft}",
                    oninput: move |evt: Event<FormData>| props.on_draft.call(evt.value()),
                }
                button {
                    r#type: "submit",
                    style: "padding: 10px 14px; border-radius: 10px; border: none; background: #166534; color: #fff; font-weight: 700; cursor: pointer;",
                    "Enviar"
                }
            }
        }
    }
}
