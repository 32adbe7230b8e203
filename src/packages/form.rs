use std::collections::BTreeMap;

use chrono::Utc;
use gloo_net::http::Request;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api::envelope::{auth_token, ApiEnvelope};
use crate::config;
use crate::packages::models::{
    compute_total, format_amount, BillingCycle, CyclePrices, SelectedService, SubscriptionPackage,
};
use crate::packages::validate::{validate_new_feature, validate_package};
use crate::Route;

/// Catalog entry served by the backend; becomes a `SelectedService` once the
/// admin picks a billing cycle for it.
#[derive(serde::Deserialize, Clone, PartialEq)]
struct CatalogService {
    id: String,
    name: String,
    prices: CyclePrices,
}

#[derive(Properties, PartialEq)]
pub struct PackageFormProps {
    /// Present in edit mode; the form prefills from the backend.
    #[prop_or_default]
    pub id: Option<String>,
}

#[function_component(PackageForm)]
pub fn package_form(props: &PackageFormProps) -> Html {
    let package = use_state(SubscriptionPackage::default);
    let catalog = use_state(|| Vec::<CatalogService>::new());
    let errors = use_state(BTreeMap::<String, String>::new);
    let feature_input = use_state(String::new);
    let feature_error = use_state(|| None::<String>);
    let submit_error = use_state(|| None::<String>);
    let saving = use_state(|| false);
    let navigator = use_navigator().unwrap();

    // Load the service catalog once.
    {
        let catalog = catalog.clone();
        let submit_error = submit_error.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    let Some(token) = auth_token() else { return };
                    match Request::get(&format!("{}/api/admin/services", config::get_backend_url()))
                        .header("Authorization", &format!("Bearer {}", token))
                        .send()
                        .await
                    {
                        Ok(response) => {
                            if let Ok(envelope) =
                                response.json::<ApiEnvelope<Vec<CatalogService>>>().await
                            {
                                match envelope.into_result("Failed to load services") {
                                    Ok(services) => catalog.set(services),
                                    Err(message) => submit_error.set(Some(message)),
                                }
                            } else {
                                submit_error.set(Some("Failed to parse service catalog".to_string()));
                            }
                        }
                        Err(_) => {
                            submit_error.set(Some("Network error loading service catalog".to_string()))
                        }
                    }
                });
                || ()
            },
            (),
        );
    }

    // Edit mode: prefill from the backend.
    {
        let package = package.clone();
        let submit_error = submit_error.clone();
        use_effect_with_deps(
            move |id: &Option<String>| {
                if let Some(id) = id.clone() {
                    spawn_local(async move {
                        let Some(token) = auth_token() else { return };
                        match Request::get(&format!(
                            "{}/api/admin/packages/{}",
                            config::get_backend_url(),
                            id
                        ))
                        .header("Authorization", &format!("Bearer {}", token))
                        .send()
                        .await
                        {
                            Ok(response) => {
                                if let Ok(envelope) =
                                    response.json::<ApiEnvelope<SubscriptionPackage>>().await
                                {
                                    match envelope.into_result("Failed to load package") {
                                        Ok(loaded) => package.set(loaded),
                                        Err(message) => submit_error.set(Some(message)),
                                    }
                                } else {
                                    submit_error.set(Some("Failed to parse package".to_string()));
                                }
                            }
                            Err(_) => submit_error.set(Some("Network error loading package".to_string())),
                        }
                    });
                }
                || ()
            },
            props.id.clone(),
        );
    }

    // Every mutation of services or discount goes through this so the
    // computed total can never go stale.
    let update_package = {
        let package = package.clone();
        Callback::from(move |mut updated: SubscriptionPackage| {
            updated.total_price = compute_total(&updated.services, updated.discount_percentage);
            package.set(updated);
        })
    };

    let on_title = {
        let package = package.clone();
        let update = update_package.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut updated = (*package).clone();
            updated.title = input.value();
            update.emit(updated);
        })
    };

    let on_description = {
        let package = package.clone();
        let update = update_package.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            let mut updated = (*package).clone();
            updated.description = input.value();
            update.emit(updated);
        })
    };

    let toggle_service = {
        let package = package.clone();
        let update = update_package.clone();
        Callback::from(move |service: CatalogService| {
            let mut updated = (*package).clone();
            if let Some(position) = updated.services.iter().position(|s| s.id == service.id) {
                updated.services.remove(position);
            } else {
                updated.services.push(SelectedService {
                    id: service.id,
                    name: service.name,
                    prices: service.prices,
                    cycle: BillingCycle::Monthly,
                });
            }
            update.emit(updated);
        })
    };

    let change_cycle = {
        let package = package.clone();
        let update = update_package.clone();
        Callback::from(move |(service_id, cycle): (String, BillingCycle)| {
            let mut updated = (*package).clone();
            if let Some(service) = updated.services.iter_mut().find(|s| s.id == service_id) {
                service.cycle = cycle;
            }
            update.emit(updated);
        })
    };

    let on_promo_code = {
        let package = package.clone();
        let update = update_package.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut updated = (*package).clone();
            updated.promo_code = input.value();
            update.emit(updated);
        })
    };

    let on_discount = {
        let package = package.clone();
        let update = update_package.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut updated = (*package).clone();
            let raw = input.value();
            updated.discount_percentage = if raw.is_empty() { None } else { raw.parse::<f64>().ok() };
            update.emit(updated);
        })
    };

    let on_promo_start = {
        let package = package.clone();
        let update = update_package.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut updated = (*package).clone();
            updated.promo_starts_at = input.value();
            update.emit(updated);
        })
    };

    let on_promo_end = {
        let package = package.clone();
        let update = update_package.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut updated = (*package).clone();
            updated.promo_ends_at = input.value();
            update.emit(updated);
        })
    };

    let on_max_users = {
        let package = package.clone();
        let update = update_package.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut updated = (*package).clone();
            updated.max_users = input.value().parse().unwrap_or(0);
            update.emit(updated);
        })
    };

    let on_note = {
        let package = package.clone();
        let update = update_package.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            let mut updated = (*package).clone();
            updated.note = input.value();
            update.emit(updated);
        })
    };

    let on_active = {
        let package = package.clone();
        let update = update_package.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut updated = (*package).clone();
            updated.is_active = input.checked();
            update.emit(updated);
        })
    };

    let on_feature_input = {
        let feature_input = feature_input.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            feature_input.set(input.value());
        })
    };

    // Duplicates are rejected here, before the list changes.
    let add_feature = {
        let package = package.clone();
        let update = update_package.clone();
        let feature_input = feature_input.clone();
        let feature_error = feature_error.clone();
        Callback::from(move |_: MouseEvent| {
            let entry = (*feature_input).clone();
            match validate_new_feature(&entry, &package.features) {
                Some(message) => feature_error.set(Some(message)),
                None => {
                    let mut updated = (*package).clone();
                    updated.features.push(entry.trim().to_string());
                    update.emit(updated);
                    feature_input.set(String::new());
                    feature_error.set(None);
                }
            }
        })
    };

    let remove_feature = {
        let package = package.clone();
        let update = update_package.clone();
        Callback::from(move |index: usize| {
            let mut updated = (*package).clone();
            updated.features.remove(index);
            update.emit(updated);
        })
    };

    let submit = {
        let package = package.clone();
        let errors = errors.clone();
        let submit_error = submit_error.clone();
        let saving = saving.clone();
        let navigator = navigator.clone();
        let editing = props.id.clone();
        Callback::from(move |_: MouseEvent| {
            let current = (*package).clone();
            let found = validate_package(&current, Utc::now().date_naive());
            if !found.is_empty() {
                errors.set(found);
                return;
            }
            errors.set(BTreeMap::new());
            let submit_error = submit_error.clone();
            let saving = saving.clone();
            let navigator = navigator.clone();
            let editing = editing.clone();
            saving.set(true);
            spawn_local(async move {
                let Some(token) = auth_token() else {
                    submit_error.set(Some("Authentication token not found".to_string()));
                    saving.set(false);
                    return;
                };
                let request = match &editing {
                    Some(id) => Request::put(&format!(
                        "{}/api/admin/packages/{}",
                        config::get_backend_url(),
                        id
                    )),
                    None => Request::post(&format!(
                        "{}/api/admin/packages",
                        config::get_backend_url()
                    )),
                };
                match request
                    .header("Authorization", &format!("Bearer {}", token))
                    .header("Content-Type", "application/json")
                    .json(&current)
                    .expect("Failed to serialize package")
                    .send()
                    .await
                {
                    Ok(response) => {
                        match response.json::<ApiEnvelope<serde_json::Value>>().await {
                            Ok(envelope) if envelope.success => {
                                navigator.push(&Route::Packages);
                            }
                            Ok(envelope) => {
                                submit_error.set(Some(
                                    envelope
                                        .message
                                        .unwrap_or_else(|| "Failed to save package".to_string()),
                                ));
                            }
                            Err(_) => {
                                submit_error.set(Some("Failed to parse save response".to_string()))
                            }
                        }
                    }
                    Err(_) => submit_error.set(Some("Network error saving package".to_string())),
                }
                saving.set(false);
            });
        })
    };

    let field_error = |key: &str| -> Html {
        if let Some(message) = errors.get(key) {
            html! { <span class="field-error">{message}</span> }
        } else {
            html! {}
        }
    };

    html! {
        <div class="page-container">
            <div class="page-panel form-panel">
                <div class="panel-header">
                    <h1 class="panel-title">
                        {if props.id.is_some() { "Edit Package" } else { "New Package" }}
                    </h1>
                    <Link<Route> to={Route::Packages} classes="back-link">{"Back to Packages"}</Link<Route>>
                </div>

                {
                    if let Some(message) = (*submit_error).as_ref() {
                        html! {
                            <div class="info-section error">
                                <span class="error-message">{message}</span>
                            </div>
                        }
                    } else {
                        html! {}
                    }
                }

                <div class="form-field">
                    <label>{"Title"}</label>
                    <input type="text" value={package.title.clone()} oninput={on_title} />
                    {field_error("title")}
                </div>

                <div class="form-field">
                    <label>{"Description"}</label>
                    <textarea value={package.description.clone()} oninput={on_description} />
                    {field_error("description")}
                </div>

                <div class="form-field">
                    <label>{"Services"}</label>
                    {field_error("services")}
                    <div class="service-grid">
                        {
                            catalog.iter().map(|service| {
                                let selected = package.services.iter().find(|s| s.id == service.id).cloned();
                                let service_index = package.services.iter().position(|s| s.id == service.id);
                                let toggle = {
                                    let toggle_service = toggle_service.clone();
                                    let service = service.clone();
                                    Callback::from(move |_: Event| toggle_service.emit(service.clone()))
                                };
                                html! {
                                    <div class="service-card" key={service.id.clone()}>
                                        <label class="service-pick">
                                            <input
                                                type="checkbox"
                                                checked={selected.is_some()}
                                                onchange={toggle}
                                            />
                                            {&service.name}
                                        </label>
                                        {
                                            if let Some(chosen) = selected {
                                                let on_cycle = {
                                                    let change_cycle = change_cycle.clone();
                                                    let service_id = service.id.clone();
                                                    Callback::from(move |e: Event| {
                                                        let select: HtmlSelectElement = e.target_unchecked_into();
                                                        if let Some(cycle) = BillingCycle::from_str(&select.value()) {
                                                            change_cycle.emit((service_id.clone(), cycle));
                                                        }
                                                    })
                                                };
                                                html! {
                                                    <>
                                                        <select onchange={on_cycle}>
                                                            {
                                                                BillingCycle::ALL.iter().map(|cycle| {
                                                                    html! {
                                                                        <option
                                                                            value={cycle.as_str()}
                                                                            selected={chosen.cycle == *cycle}
                                                                        >
                                                                            {format!("{} — {}", cycle.label(), format_amount(service.prices.for_cycle(*cycle)))}
                                                                        </option>
                                                                    }
                                                                }).collect::<Html>()
                                                            }
                                                        </select>
                                                        {
                                                            if let Some(index) = service_index {
                                                                field_error(&format!("service-{}", index))
                                                            } else {
                                                                html! {}
                                                            }
                                                        }
                                                    </>
                                                }
                                            } else {
                                                html! {}
                                            }
                                        }
                                    </div>
                                }
                            }).collect::<Html>()
                        }
                    </div>
                </div>

                <div class="form-row">
                    <div class="form-field">
                        <label>{"Promo Code"}</label>
                        <input type="text" value={package.promo_code.clone()} oninput={on_promo_code} />
                        {field_error("promo_code")}
                    </div>
                    <div class="form-field">
                        <label>{"Discount %"}</label>
                        <input
                            type="number"
                            min="0"
                            max="100"
                            value={package.discount_percentage.map(|d| d.to_string()).unwrap_or_default()}
                            oninput={on_discount}
                        />
                        {field_error("discount_percentage")}
                    </div>
                </div>

                <div class="form-row">
                    <div class="form-field">
                        <label>{"Promo Starts"}</label>
                        <input type="date" value={package.promo_starts_at.clone()} onchange={on_promo_start} />
                    </div>
                    <div class="form-field">
                        <label>{"Promo Ends"}</label>
                        <input type="date" value={package.promo_ends_at.clone()} onchange={on_promo_end} />
                    </div>
                </div>
                {field_error("promo_dates")}

                <div class="form-field">
                    <label>{"Max Users"}</label>
                    <input
                        type="number"
                        min="1"
                        max="10000"
                        value={package.max_users.to_string()}
                        oninput={on_max_users}
                    />
                    {field_error("max_users")}
                </div>

                <div class="form-field">
                    <label>{"Features"}</label>
                    {field_error("features")}
                    <div class="feature-add">
                        <input
                            type="text"
                            placeholder="Add a feature..."
                            value={(*feature_input).clone()}
                            oninput={on_feature_input}
                        />
                        <button type="button" onclick={add_feature}>{"Add"}</button>
                    </div>
                    {
                        if let Some(message) = (*feature_error).as_ref() {
                            html! { <span class="field-error">{message}</span> }
                        } else {
                            html! {}
                        }
                    }
                    <ul class="feature-list">
                        {
                            package.features.iter().enumerate().map(|(index, feature)| {
                                let remove = {
                                    let remove_feature = remove_feature.clone();
                                    Callback::from(move |_: MouseEvent| remove_feature.emit(index))
                                };
                                html! {
                                    <li key={feature.clone()}>
                                        {feature}
                                        <button type="button" class="link-button danger" onclick={remove}>{"Remove"}</button>
                                    </li>
                                }
                            }).collect::<Html>()
                        }
                    </ul>
                </div>

                <div class="form-field">
                    <label>{"Note"}</label>
                    <textarea value={package.note.clone()} oninput={on_note} />
                </div>

                <div class="form-field checkbox-field">
                    <label>
                        <input type="checkbox" checked={package.is_active} onchange={on_active} />
                        {"Active"}
                    </label>
                </div>

                <div class="form-summary">
                    <span>{"Computed total: "}</span>
                    <strong>{format_amount(package.total_price)}</strong>
                    {
                        if package.discount_percentage.unwrap_or(0.0) > 0.0 {
                            html! {
                                <span class="summary-hint">
                                    {format!(" (after {}% discount)", package.discount_percentage.unwrap_or(0.0))}
                                </span>
                            }
                        } else {
                            html! {}
                        }
                    }
                </div>

                <button class="primary-button" onclick={submit} disabled={*saving}>
                    {if *saving { "Saving..." } else { "Save Package" }}
                </button>
            </div>
        </div>
    }
}
