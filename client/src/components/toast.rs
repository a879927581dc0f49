//! Transient notice banner.

#[cfg(test)]
#[path = "toast_test.rs"]
mod toast_test;

use leptos::prelude::*;
use netops_session::NoticeLevel;

use crate::state::toast::ToastState;

/// How long a notice stays up before dismissing itself.
#[cfg(feature = "csr")]
const TOAST_MS: u32 = 4_000;

pub fn toast_class(level: NoticeLevel) -> &'static str {
    match level {
        NoticeLevel::Info => "toast toast--info",
        NoticeLevel::Warning => "toast toast--warning",
        NoticeLevel::Error => "toast toast--error",
    }
}

/// Shows the current notice; click or timeout dismisses it.
#[component]
pub fn Toast() -> impl IntoView {
    let toast = expect_context::<RwSignal<ToastState>>();

    #[cfg(feature = "csr")]
    Effect::new(move || {
        let (serial, showing) = toast.with(|t| (t.serial, t.current.is_some()));
        if showing {
            leptos::task::spawn_local(async move {
                gloo_timers::future::TimeoutFuture::new(TOAST_MS).await;
                toast.update(|t| {
                    if t.serial == serial {
                        t.dismiss();
                    }
                });
            });
        }
    });

    let class = move || toast.with(|t| t.current.as_ref().map_or("toast", |n| toast_class(n.level)));
    let message = move || toast.with(|t| t.current.as_ref().map(|n| n.message.clone()).unwrap_or_default());

    view! {
        <Show when=move || toast.with(|t| t.current.is_some())>
            <div class=class role="status" on:click=move |_| toast.update(ToastState::dismiss)>
                {message}
            </div>
        </Show>
    }
}
