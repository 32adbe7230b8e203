use gloo_net::http::Request;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api::envelope::{auth_token, ApiEnvelope, Paginated};
use crate::api::geo::{fetch_countries, fetch_states, GeoOption};
use crate::components::confirm_modal::ConfirmModal;
use crate::components::notification::{Toast, ToastKind};
use crate::config;
use crate::default_pricing::models::{DefaultPricing, PricingLevel};
use crate::packages::models::format_amount;
use crate::Route;

#[derive(Clone, PartialEq)]
enum PendingAction {
    Delete { id: String, scope: String },
    ToggleStatus { id: String, scope: String, activate: bool },
}

#[function_component(DefaultPricingPage)]
pub fn default_pricing_page() -> Html {
    let entries = use_state(|| Vec::<DefaultPricing>::new());
    let page = use_state(|| 1u32);
    let total_pages = use_state(|| 1u32);
    // Server-side filters; changing either resets to page 1.
    let country_filter = use_state(String::new);
    let state_filter = use_state(String::new);
    let countries = use_state(|| Vec::<GeoOption>::new());
    let states = use_state(|| Vec::<GeoOption>::new());
    // Client-side refinement of the fetched page.
    let search = use_state(String::new);
    let level_filter = use_state(|| None::<PricingLevel>);
    let error = use_state(|| None::<String>);
    let toast = use_state(|| None::<(String, ToastKind)>);
    let pending = use_state(|| None::<PendingAction>);
    let navigator = use_navigator().unwrap();

    {
        let countries = countries.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    if let Ok(options) = fetch_countries().await {
                        countries.set(options);
                    }
                });
                || ()
            },
            (),
        );
    }

    // States reload when the country filter changes.
    {
        let states = states.clone();
        let state_filter = state_filter.clone();
        use_effect_with_deps(
            move |country: &String| {
                state_filter.set(String::new());
                if country.is_empty() {
                    states.set(Vec::new());
                } else {
                    let country = country.clone();
                    spawn_local(async move {
                        if let Ok(options) = fetch_states(&country).await {
                            states.set(options);
                        }
                    });
                }
                || ()
            },
            (*country_filter).clone(),
        );
    }

    {
        let entries = entries.clone();
        let total_pages = total_pages.clone();
        let error = error.clone();
        use_effect_with_deps(
            move |(current_page, country, state): &(u32, String, String)| {
                let mut url = format!(
                    "{}/api/admin/default-pricing?page={}",
                    config::get_backend_url(),
                    current_page
                );
                if !country.is_empty() {
                    url.push_str(&format!("&country={}", country));
                }
                if !state.is_empty() {
                    url.push_str(&format!("&state={}", state));
                }
                spawn_local(async move {
                    let Some(token) = auth_token() else {
                        error.set(Some("Authentication token not found".to_string()));
                        return;
                    };
                    match Request::get(&url)
                        .header("Authorization", &format!("Bearer {}", token))
                        .send()
                        .await
                    {
                        Ok(response) => {
                            if response.ok() {
                                match response
                                    .json::<ApiEnvelope<Paginated<DefaultPricing>>>()
                                    .await
                                {
                                    Ok(envelope) => {
                                        match envelope.into_result("Failed to load pricing entries") {
                                            Ok(listing) => {
                                                total_pages.set(listing.total_pages.max(1));
                                                entries.set(listing.items);
                                                error.set(None);
                                            }
                                            Err(message) => error.set(Some(message)),
                                        }
                                    }
                                    Err(_) => error
                                        .set(Some("Failed to parse pricing entries".to_string())),
                                }
                            } else {
                                error.set(Some("Failed to load pricing entries".to_string()));
                            }
                        }
                        Err(_) => error.set(Some("Network error loading pricing entries".to_string())),
                    }
                });
                || ()
            },
            (*page, (*country_filter).clone(), (*state_filter).clone()),
        );
    }

    let on_country_filter = {
        let country_filter = country_filter.clone();
        let page = page.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            country_filter.set(select.value());
            page.set(1);
        })
    };

    let on_state_filter = {
        let state_filter = state_filter.clone();
        let page = page.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            state_filter.set(select.value());
            page.set(1);
        })
    };

    let on_search = {
        let search = search.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            search.set(input.value());
        })
    };

    let on_level_filter = {
        let level_filter = level_filter.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            level_filter.set(PricingLevel::from_str(&select.value()));
        })
    };

    let needle = search.to_lowercase();
    let visible: Vec<DefaultPricing> = entries
        .iter()
        .filter(|entry| {
            (needle.is_empty() || entry.scope_label().to_lowercase().contains(&needle))
                && level_filter.map_or(true, |level| entry.level() == level)
        })
        .cloned()
        .collect();

    let run_pending = {
        let pending = pending.clone();
        let entries = entries.clone();
        let toast = toast.clone();
        Callback::from(move |_| {
            let Some(action) = (*pending).clone() else { return };
            pending.set(None);
            let entries = entries.clone();
            let toast = toast.clone();
            spawn_local(async move {
                let Some(token) = auth_token() else {
                    toast.set(Some(("Authentication token not found".to_string(), ToastKind::Error)));
                    return;
                };
                let (request, fallback) = match &action {
                    PendingAction::Delete { id, .. } => (
                        Request::delete(&format!(
                            "{}/api/admin/default-pricing/{}",
                            config::get_backend_url(),
                            id
                        )),
                        "Failed to delete pricing entry",
                    ),
                    PendingAction::ToggleStatus { id, activate, .. } => (
                        Request::patch(&format!(
                            "{}/api/admin/default-pricing/{}/status?active={}",
                            config::get_backend_url(),
                            id,
                            activate
                        )),
                        "Failed to update pricing status",
                    ),
                };
                match request
                    .header("Authorization", &format!("Bearer {}", token))
                    .send()
                    .await
                {
                    Ok(response) => {
                        let outcome = match response.json::<ApiEnvelope<serde_json::Value>>().await {
                            Ok(envelope) if envelope.success => Ok(envelope.message),
                            Ok(envelope) => {
                                Err(envelope.message.unwrap_or_else(|| fallback.to_string()))
                            }
                            Err(_) if response.ok() => Ok(None),
                            Err(_) => Err(fallback.to_string()),
                        };
                        match outcome {
                            Ok(message) => match &action {
                                PendingAction::Delete { id, .. } => {
                                    let remaining: Vec<DefaultPricing> = entries
                                        .iter()
                                        .filter(|e| e.id.as_deref() != Some(id.as_str()))
                                        .cloned()
                                        .collect();
                                    entries.set(remaining);
                                    toast.set(Some((
                                        message.unwrap_or_else(|| "Pricing entry deleted".to_string()),
                                        ToastKind::Success,
                                    )));
                                }
                                PendingAction::ToggleStatus { id, activate, .. } => {
                                    let updated: Vec<DefaultPricing> = entries
                                        .iter()
                                        .map(|e| {
                                            let mut e = e.clone();
                                            if e.id.as_deref() == Some(id.as_str()) {
                                                e.is_active = *activate;
                                            }
                                            e
                                        })
                                        .collect();
                                    entries.set(updated);
                                    toast.set(Some((
                                        message.unwrap_or_else(|| "Pricing status updated".to_string()),
                                        ToastKind::Success,
                                    )));
                                }
                            },
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
                    <h1 class="panel-title">{"Default Pricing"}</h1>
                    <Link<Route> to={Route::DefaultPricingNew} classes="primary-link">
                        {"New Pricing Entry"}
                    </Link<Route>>
                </div>

                <div class="filter-bar">
                    <select onchange={on_country_filter}>
                        <option value="" selected={country_filter.is_empty()}>{"All countries"}</option>
                        {
                            countries.iter().map(|option| {
                                html! {
                                    <option
                                        value={option.code.clone()}
                                        selected={*country_filter == option.code}
                                    >
                                        {&option.name}
                                    </option>
                                }
                            }).collect::<Html>()
                        }
                    </select>
                    <select onchange={on_state_filter} disabled={country_filter.is_empty()}>
                        <option value="" selected={state_filter.is_empty()}>{"All states"}</option>
                        {
                            states.iter().map(|option| {
                                html! {
                                    <option
                                        value={option.code.clone()}
                                        selected={*state_filter == option.code}
                                    >
                                        {&option.name}
                                    </option>
                                }
                            }).collect::<Html>()
                        }
                    </select>
                    <select onchange={on_level_filter}>
                        <option value="" selected={level_filter.is_none()}>{"All levels"}</option>
                        {
                            PricingLevel::ALL.iter().map(|level| {
                                html! {
                                    <option
                                        value={level.as_str()}
                                        selected={*level_filter == Some(*level)}
                                    >
                                        {level.label()}
                                    </option>
                                }
                            }).collect::<Html>()
                        }
                    </select>
                    <input
                        type="text"
                        class="search-input"
                        placeholder="Search this page..."
                        value={(*search).clone()}
                        oninput={on_search}
                    />
                </div>

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
                                        <th>{"Scope"}</th>
                                        <th>{"Level"}</th>
                                        <th>{"Default Fee"}</th>
                                        <th>{"Status"}</th>
                                        <th>{"Actions"}</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {
                                        visible.iter().map(|entry| {
                                            let id = entry.id.clone().unwrap_or_default();
                                            let scope = entry.scope_label();
                                            let edit = {
                                                let navigator = navigator.clone();
                                                let id = id.clone();
                                                Callback::from(move |_: MouseEvent| {
                                                    navigator.push(&Route::DefaultPricingEdit { id: id.clone() });
                                                })
                                            };
                                            let ask_toggle = {
                                                let pending = pending.clone();
                                                let id = id.clone();
                                                let scope = scope.clone();
                                                let activate = !entry.is_active;
                                                Callback::from(move |_: MouseEvent| {
                                                    pending.set(Some(PendingAction::ToggleStatus {
                                                        id: id.clone(),
                                                        scope: scope.clone(),
                                                        activate,
                                                    }));
                                                })
                                            };
                                            let ask_delete = {
                                                let pending = pending.clone();
                                                let id = id.clone();
                                                let scope = scope.clone();
                                                Callback::from(move |_: MouseEvent| {
                                                    pending.set(Some(PendingAction::Delete {
                                                        id: id.clone(),
                                                        scope: scope.clone(),
                                                    }));
                                                })
                                            };
                                            html! {
                                                <tr key={id.clone()}>
                                                    <td>{scope.clone()}</td>
                                                    <td>{entry.level().label()}</td>
                                                    <td>{format_amount(entry.default_fee)}</td>
                                                    <td>
                                                        <span class={if entry.is_active { "badge active" } else { "badge inactive" }}>
                                                            {if entry.is_active { "Active" } else { "Inactive" }}
                                                        </span>
                                                    </td>
                                                    <td class="row-actions">
                                                        <button class="link-button" onclick={edit}>{"Edit"}</button>
                                                        <button class="link-button" onclick={ask_toggle}>
                                                            {if entry.is_active { "Deactivate" } else { "Activate" }}
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
                        PendingAction::Delete { scope, .. } => (
                            "Delete pricing entry".to_string(),
                            format!("Delete the default pricing for {}? This cannot be undone.", scope),
                            "Delete".to_string(),
                        ),
                        PendingAction::ToggleStatus { scope, activate, .. } => (
                            if *activate { "Activate pricing entry".to_string() } else { "Deactivate pricing entry".to_string() },
                            format!(
                                "{} the default pricing for {}?",
                                if *activate { "Activate" } else { "Deactivate" },
                                scope
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
