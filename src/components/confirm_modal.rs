use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ConfirmModalProps {
    pub title: String,
    pub message: String,
    #[prop_or("Confirm".to_string())]
    pub confirm_label: String,
    pub on_confirm: Callback<()>,
    pub on_cancel: Callback<()>,
}

/// Blocking confirmation dialog used by delete, status-toggle and purchase
/// actions. Nothing is sent to the backend until the user confirms.
#[function_component(ConfirmModal)]
pub fn confirm_modal(props: &ConfirmModalProps) -> Html {
    let on_confirm = {
        let on_confirm = props.on_confirm.clone();
        Callback::from(move |_: MouseEvent| on_confirm.emit(()))
    };
    let on_cancel = {
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |_: MouseEvent| on_cancel.emit(()))
    };

    html! {
        <div class="modal-overlay">
            <div class="modal-content">
                <h3>{&props.title}</h3>
                <p>{&props.message}</p>
                <div class="modal-actions">
                    <button class="cancel-button" onclick={on_cancel}>{"Cancel"}</button>
                    <button class="confirm-button" onclick={on_confirm}>{&props.confirm_label}</button>
                </div>
            </div>
        </div>
    }
}
