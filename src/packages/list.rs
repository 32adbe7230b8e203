use gloo_net::http::Request;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api::envelope::{auth_token, ApiEnvelope, Paginated};
use crate::components::confirm_modal::ConfirmModal;
use crate::components::notification::{Toast, ToastKind};
use crate::config;
use crate::packages::models::{format_amount, SubscriptionPackage};
use crate::Route;

#[derive(Clone, PartialEq)]
enum PendingAction {
    Delete { id: String, title: String },
    ToggleStatus { id: String, title: String, activate: bool },
}

#[function_component(PackagesPage)]
pub fn packages_page() -> Html {
    let packages = use_state(|| Vec::<SubscriptionPackage>::new());
    let page = use_state(|| 1u32);
    let total_pages = use_state(|| 1u32);
    let search = use_state(String::new);
    let error = use_state(|| None::<String>);
    let toast = use_state(|| None::<(String, ToastKind)>);
    let pending = use_state(|| None::<PendingAction>);
    let navigator = use_navigator().unwrap();

    // Reload whenever the page number changes.
    {
        let packages = packages.clone();
        let total_pages = total_pages.clone();
        let error = error.clone();
        use_effect_with_deps(
            move |current_page| {
                let current_page = *current_page;
                spawn_local(async move {
                    let Some(token) = auth_token() else {
                        error.set(Some("Authentication token not found".to_string()));
                        return;
                    };
                    match Request::get(&format!(
                        "{}/api/admin/packages?page={}",
                        config::get_backend_url(),
                        current_page
                    ))
                    .header("Authorization", &format!("Bearer {}", token))
                    .send()
                    .await
                    {
                        Ok(response) => {
                            if response.ok() {
                                match response
                                    .json::<ApiEnvelope<Paginated<SubscriptionPackage>>>()
                                    .await
                                {
                                    Ok(envelope) => match envelope.into_result("Failed to load packages") {
                                        Ok(listing) => {
                                            total_pages.set(listing.total_pages.max(1));
                                            packages.set(listing.items);
                                            error.set(None);
                                        }
                                        Err(message) => error.set(Some(message)),
                                    },
                                    Err(_) => {
                                        error.set(Some("Failed to parse packages".to_string()))
                                    }
                                }
                            } else {
                                error.set(Some("Failed to load packages".to_string()));
                            }
                        }
                        Err(_) => error.set(Some("Network error loading packages".to_string())),
                    }
                });
                || ()
            },
            *page,
        );
    }

    let on_search = {
        let search = search.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            search.set(input.value());
        })
    };

    // Search applies to the fetched page only; the backend owns pagination.
    let needle = search.to_lowercase();
    let visible: Vec<SubscriptionPackage> = packages
        .iter()
        .filter(|package| {
            needle.is_empty()
                || package.title.to_lowercase().contains(&needle)
                || package.description.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect();

    let run_pending = {
        let pending = pending.clone();
        let packages = packages.clone();
        let toast = toast.clone();
        Callback::from(move |_| {
            let Some(action) = (*pending).clone() else { return };
            pending.set(None);
            let packages = packages.clone();
            let toast = toast.clone();
            spawn_local(async move {
                let Some(token) = auth_token() else {
                    toast.set(Some(("Authentication token not found".to_string(), ToastKind::Error)));
                    return;
                };
                let (request, fallback) = match &action {
                    PendingAction::Delete { id, .. } => (
                        Request::delete(&format!(
                            "{}/api/admin/packages/{}",
                            config::get_backend_url(),
                            id
                        )),
                        "Failed to delete package",
                    ),
                    PendingAction::ToggleStatus { id, activate, .. } => (
                        Request::patch(&format!(
                            "{}/api/admin/packages/{}/status?active={}",
                            config::get_backend_url(),
                            id,
                            activate
                        )),
                        "Failed to update package status",
                    ),
                };
                match request
                    .header("Authorization", &format!("Bearer {}", token))
                    .send()
                    .await
                {
                    Ok(response) => {
                        let parsed = response.json::<ApiEnvelope<serde_json::Value>>().await;
                        let outcome = match parsed {
                            Ok(envelope) if envelope.success => Ok(envelope.message),
                            Ok(envelope) => {
                                Err(envelope.message.unwrap_or_else(|| fallback.to_string()))
                            }
                            Err(_) if response.ok() => Ok(None),
                            Err(_) => Err(fallback.to_string()),
                        };
                        match outcome {
                            Ok(message) => {
                                // Reflect the change locally; the next page
                                // load re-syncs with the backend.
                                match &action {
                                    PendingAction::Delete { id, .. } => {
                                        let remaining: Vec<SubscriptionPackage> = packages
                                            .iter()
                                            .filter(|p| p.id.as_deref() != Some(id.as_str()))
                                            .cloned()
                                            .collect();
                                        packages.set(remaining);
                                        toast.set(Some((
                                            message.unwrap_or_else(|| "Package deleted".to_string()),
                                            ToastKind::Success,
                                        )));
                                    }
                                    PendingAction::ToggleStatus { id, activate, .. } => {
                                        let updated: Vec<SubscriptionPackage> = packages
                                            .iter()
                                            .map(|p| {
                                                let mut p = p.clone();
                                                if p.id.as_deref() == Some(id.as_str()) {
                                                    p.is_active = *activate;
                                                }
                                                p
                                            })
                                            .collect();
                                        packages.set(updated);
                                        toast.set(Some((
                                            message.unwrap_or_else(|| "Package status updated".to_string()),
                                            ToastKind::Success,
                                        )));
                                    }
                                }
                            }
                            Err(message) => toast.set(Some((message, ToastKind::Error))),
                        }
                    }
                    Err(_) => toast.set(Some((fallback.to_string(), ToastKind::Error))),
                }
            });
        })
    };

    let cancel_pending = {
        let pending = pending.clone();
        Callback::from(move |_| pending.set(None))
    };

    let prev_page = {
        let page = page.clone();
        Callback::from(move |_: MouseEvent| {
            if *page > 1 {
                page.set(*page - 1);
            }
        })
    };
    let next_page = {
        let page = page.clone();
        let total_pages = total_pages.clone();
        Callback::from(move |_: MouseEvent| {
            if *page < *total_pages {
                page.set(*page + 1);
            }
        })
    };

    html! {
        <div class="page-container">
            <div class="page-panel">
                <div class="panel-header">
                    <h1 class="panel-title">{"Subscription Packages"}</h1>
                    <Link<Route> to={Route::PackageNew} classes="primary-link">
                        {"New Package"}
                    </Link<Route>>
                </div>

                <input
                    type="text"
                    class="search-input"
                    placeholder="Search this page by title or description..."
                    value={(*search).clone()}
                    oninput={on_search}
                />

                {
                    if let Some(error_msg) = (*error).as_ref() {
                        html! {
                            <div class="info-section error">
                                <span class="error-message">{error_msg}</span>
                            </div>
                        }
                    } else {
                        html! {
                            <table class="data-table">
                                <thead>
                                    <tr>
                                        <th>{"Title"}</th>
                                        <th>{"Services"}</th>
                                        <th>{"Price"}</th>
                                        <th>{"Max Users"}</th>
                                        <th>{"Status"}</th>
                                        <th>{"Actions"}</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {
                                        visible.iter().map(|package| {
                                            let id = package.id.clone().unwrap_or_default();
                                            let edit = {
                                                let navigator = navigator.clone();
                                                let id = id.clone();
                                                Callback::from(move |_: MouseEvent| {
                                                    navigator.push(&Route::PackageEdit { id: id.clone() });
                                                })
                                            };
                                            let ask_toggle = {
                                                let pending = pending.clone();
                                                let id = id.clone();
                                                let title = package.title.clone();
                                                let activate = !package.is_active;
                                                Callback::from(move |_: MouseEvent| {
                                                    pending.set(Some(PendingAction::ToggleStatus {
                                                        id: id.clone(),
                                                        title: title.clone(),
                                                        activate,
                                                    }));
                                                })
                                            };
                                            let ask_delete = {
                                                let pending = pending.clone();
                                                let id = id.clone();
                                                let title = package.title.clone();
                                                Callback::from(move |_: MouseEvent| {
                                                    pending.set(Some(PendingAction::Delete {
                                                        id: id.clone(),
                                                        title: title.clone(),
                                                    }));
                                                })
                                            };
                                            html! {
                                                <tr key={id.clone()}>
                                                    <td>{&package.title}</td>
                                                    <td>{package.services.len()}</td>
                                                    <td>{format_amount(package.total_price)}</td>
                                                    <td>{package.max_users}</td>
                                                    <td>
                                                        <span class={if package.is_active { "badge active" } else { "badge inactive" }}>
                                                            {if package.is_active { "Active" } else { "Inactive" }}
                                                        </span>
                                                    </td>
                                                    <td class="row-actions">
                                                        <button class="link-button" onclick={edit}>{"Edit"}</button>
                                                        <button class="link-button" onclick={ask_toggle}>
                                                            {if package.is_active { "Deactivate" } else { "Activate" }}
                                                        </button>
                                                        <button class="link-button danger" onclick={ask_delete}>{"Delete"}</button>
                                                    </td>
                                                </tr>
                                            }
                                        }).collect::<Html>()
                                    }
                                </tbody>
                            </table>
                        }
                    }
                }

                <div class="pagination">
                    <button onclick={prev_page} disabled={*page <= 1}>{"Previous"}</button>
                    <span class="page-indicator">{format!("Page {} of {}", *page, *total_pages)}</span>
                    <button onclick={next_page} disabled={*page >= *total_pages}>{"Next"}</button>
                </div>
            </div>

            {
                if let Some(action) = (*pending).clone() {
                    let (title, message, label) = match &action {
                        PendingAction::Delete { title, .. } => (
                            "Delete package".to_string(),
                            format!("Delete \"{}\"? This cannot be undone.", title),
                            "Delete".to_string(),
                        ),
                        PendingAction::ToggleStatus { title, activate, .. } => (
                            if *activate { "Activate package".to_string() } else { "Deactivate package".to_string() },
                            format!(
                                "{} \"{}\"?",
                                if *activate { "Activate" } else { "Deactivate" },
                                title
                            ),
                            "Confirm".to_string(),
                        ),
                    };
                    html! {
                        <ConfirmModal
                            {title}
                            {message}
                            confirm_label={label}
                            on_confirm={run_pending.clone()}
                            on_cancel={cancel_pending.clone()}
                        />
                    }
                } else {
                    html! {}
                }
            }

            {
                if let Some((message, kind)) = (*toast).clone() {
                    let toast = toast.clone();
                    html! {
                        <Toast
                            {message}
                            {kind}
                            on_dismiss={Callback::from(move |_| toast.set(None))}
                        />
                    }
                } else {
                    html! {}
                }
            }
        </div>
    }
}
