use yew::prelude::*;
use gloo_timers::callback::Timeout;

#[derive(Clone, Copy, PartialEq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Properties, PartialEq)]
pub struct ToastProps {
    pub message: String,
    pub kind: ToastKind,
    pub on_dismiss: Callback<()>,
    /// Milliseconds before auto-dismiss.
    #[prop_or(3000)]
    pub duration_ms: u32,
}

/// Timed toast shown after delete/status-toggle and other list actions.
/// Dismisses itself after `duration_ms` or when clicked.
#[function_component(Toast)]
pub fn toast(props: &ToastProps) -> Html {
    {
        let on_dismiss = props.on_dismiss.clone();
        let duration = props.duration_ms;
        use_effect_with_deps(
            move |_| {
                let timeout = Timeout::new(duration, move || {
                    on_dismiss.emit(());
                });
                timeout.forget();
                || ()
            },
            props.message.clone(),
        );
    }

    let class = match props.kind {
        ToastKind::Success => "toast toast-success",
        ToastKind::Error => "toast toast-error",
    };

    let onclick = {
        let on_dismiss = props.on_dismiss.clone();
        Callback::from(move |_| on_dismiss.emit(()))
    };

    html! {
        <div {class} {onclick}>
            <span class="toast-message">{&props.message}</span>
        </div>
    }
}
