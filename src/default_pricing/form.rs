use std::collections::BTreeMap;

use gloo_console::log;
use gloo_net::http::Request;
use serde_json::json;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api::envelope::{auth_token, ApiEnvelope};
use crate::api::geo::{
    fetch_cities, fetch_countries, fetch_lgas, fetch_states, GeoOption, RequestSeq,
};
use crate::components::searchable_select::SearchableSelect;
use crate::config;
use crate::default_pricing::models::{validate_entry, DefaultPricing, PricingLevel};
use crate::Route;

#[derive(Properties, PartialEq)]
pub struct DefaultPricingFormProps {
    #[prop_or_default]
    pub id: Option<String>,
}

#[function_component(DefaultPricingForm)]
pub fn default_pricing_form(props: &DefaultPricingFormProps) -> Html {
    let level = use_state(|| PricingLevel::Country);
    let country = use_state(|| None::<GeoOption>);
    let state = use_state(|| None::<GeoOption>);
    let lga = use_state(|| None::<GeoOption>);
    let city = use_state(|| None::<GeoOption>);
    let fee = use_state(String::new);
    let is_active = use_state(|| true);

    let countries = use_state(|| Vec::<GeoOption>::new());
    let states = use_state(|| Vec::<GeoOption>::new());
    let lgas = use_state(|| Vec::<GeoOption>::new());
    let cities = use_state(|| Vec::<GeoOption>::new());

    // One sequence per dependent dropdown so a slow earlier load can't
    // clobber the options of a newer selection.
    let state_seq = use_mut_ref(RequestSeq::new);
    let lga_seq = use_mut_ref(RequestSeq::new);
    let city_seq = use_mut_ref(RequestSeq::new);

    let errors = use_state(BTreeMap::<String, String>::new);
    let submit_error = use_state(|| None::<String>);
    let saving = use_state(|| false);
    let navigator = use_navigator().unwrap();

    {
        let countries = countries.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    match fetch_countries().await {
                        Ok(options) => countries.set(options),
                        Err(message) => log!("countries load failed:", message),
                    }
                });
                || ()
            },
            (),
        );
    }

    // Edit mode prefill.
    {
        let level = level.clone();
        let country = country.clone();
        let state = state.clone();
        let lga = lga.clone();
        let city = city.clone();
        let fee = fee.clone();
        let is_active = is_active.clone();
        let submit_error = submit_error.clone();
        use_effect_with_deps(
            move |id: &Option<String>| {
                if let Some(id) = id.clone() {
                    spawn_local(async move {
                        let Some(token) = auth_token() else { return };
                        match Request::get(&format!(
                            "{}/api/admin/default-pricing/{}",
                            config::get_backend_url(),
                            id
                        ))
                        .header("Authorization", &format!("Bearer {}", token))
                        .send()
                        .await
                        {
                            Ok(response) => {
                                if let Ok(envelope) =
                                    response.json::<ApiEnvelope<DefaultPricing>>().await
                                {
                                    match envelope.into_result("Failed to load pricing entry") {
                                        Ok(entry) => {
                                            level.set(entry.level());
                                            country.set(Some(GeoOption {
                                                code: entry.country_code.clone(),
                                                name: entry.country_name.clone(),
                                            }));
                                            state.set(zip_option(entry.state_code, entry.state_name));
                                            lga.set(zip_option(entry.lga_code, entry.lga_name));
                                            city.set(zip_option(entry.city_code, entry.city_name));
                                            fee.set(entry.default_fee.to_string());
                                            is_active.set(entry.is_active);
                                        }
                                        Err(message) => submit_error.set(Some(message)),
                                    }
                                } else {
                                    submit_error.set(Some("Failed to parse pricing entry".to_string()));
                                }
                            }
                            Err(_) => {
                                submit_error.set(Some("Network error loading pricing entry".to_string()))
                            }
                        }
                    });
                }
                || ()
            },
            props.id.clone(),
        );
    }

    let on_level = {
        let level = level.clone();
        let state = state.clone();
        let lga = lga.clone();
        let city = city.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Some(chosen) = PricingLevel::from_str(&select.value()) {
                level.set(chosen);
                // Narrowing the level drops the scopes it no longer uses.
                if !chosen.requires_state() {
                    state.set(None);
                }
                if !chosen.requires_lga() {
                    lga.set(None);
                }
                if !chosen.requires_city() {
                    city.set(None);
                }
            }
        })
    };

    let on_country = {
        let country = country.clone();
        let state = state.clone();
        let lga = lga.clone();
        let city = city.clone();
        let states = states.clone();
        let lgas = lgas.clone();
        let cities = cities.clone();
        let state_seq = state_seq.clone();
        Callback::from(move |option: GeoOption| {
            country.set(Some(option.clone()));
            state.set(None);
            lga.set(None);
            city.set(None);
            lgas.set(Vec::new());
            cities.set(Vec::new());
            let states = states.clone();
            let ticket = state_seq.borrow().begin();
            let seq = state_seq.borrow().clone();
            spawn_local(async move {
                match fetch_states(&option.code).await {
                    Ok(options) => {
                        if seq.is_current(ticket) {
                            states.set(options);
                        }
                    }
                    Err(message) => log!("states load failed:", message),
                }
            });
        })
    };

    let on_state = {
        let country = country.clone();
        let state = state.clone();
        let lga = lga.clone();
        let city = city.clone();
        let lgas = lgas.clone();
        let cities = cities.clone();
        let lga_seq = lga_seq.clone();
        Callback::from(move |option: GeoOption| {
            state.set(Some(option.clone()));
            lga.set(None);
            city.set(None);
            cities.set(Vec::new());
            let Some(country) = (*country).clone() else { return };
            let lgas = lgas.clone();
            let ticket = lga_seq.borrow().begin();
            let seq = lga_seq.borrow().clone();
            spawn_local(async move {
                match fetch_lgas(&country.code, &option.code).await {
                    Ok(options) => {
                        if seq.is_current(ticket) {
                            lgas.set(options);
                        }
                    }
                    Err(message) => log!("lgas load failed:", message),
                }
            });
        })
    };

    let on_lga = {
        let country = country.clone();
        let state = state.clone();
        let lga = lga.clone();
        let city = city.clone();
        let cities = cities.clone();
        let city_seq = city_seq.clone();
        Callback::from(move |option: GeoOption| {
            lga.set(Some(option.clone()));
            city.set(None);
            let (Some(country), Some(state)) = ((*country).clone(), (*state).clone()) else {
                return;
            };
            let cities = cities.clone();
            let ticket = city_seq.borrow().begin();
            let seq = city_seq.borrow().clone();
            spawn_local(async move {
                match fetch_cities(&country.code, &state.code, Some(&option.code)).await {
                    Ok(options) => {
                        if seq.is_current(ticket) {
                            cities.set(options);
                        }
                    }
                    Err(message) => log!("cities load failed:", message),
                }
            });
        })
    };

    let on_city = {
        let city = city.clone();
        Callback::from(move |option: GeoOption| {
            city.set(Some(option));
        })
    };

    let on_fee = {
        let fee = fee.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            fee.set(input.value());
        })
    };

    let on_active = {
        let is_active = is_active.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            is_active.set(input.checked());
        })
    };

    let submit = {
        let level = level.clone();
        let country = country.clone();
        let state = state.clone();
        let lga = lga.clone();
        let city = city.clone();
        let fee = fee.clone();
        let is_active = is_active.clone();
        let errors = errors.clone();
        let submit_error = submit_error.clone();
        let saving = saving.clone();
        let navigator = navigator.clone();
        let editing = props.id.clone();
        Callback::from(move |_: MouseEvent| {
            let chosen_level = *level;
            let country_code = country.as_ref().map(|o| o.code.clone()).unwrap_or_default();
            let state_code = state.as_ref().map(|o| o.code.clone()).unwrap_or_default();
            let lga_code = lga.as_ref().map(|o| o.code.clone()).unwrap_or_default();
            let city_code = city.as_ref().map(|o| o.code.clone()).unwrap_or_default();
            let found = validate_entry(
                chosen_level,
                &country_code,
                &state_code,
                &lga_code,
                &city_code,
                &fee,
            );
            if !found.is_empty() {
                errors.set(found);
                return;
            }
            errors.set(BTreeMap::new());

            // Only the fields the level demands go on the wire.
            let mut payload = json!({
                "country_code": country_code,
                "country_name": country.as_ref().map(|o| o.name.clone()).unwrap_or_default(),
                "default_fee": fee.parse::<f64>().unwrap_or(0.0),
                "is_active": *is_active,
            });
            if chosen_level.requires_state() {
                payload["state_code"] = json!(state_code);
                payload["state_name"] = json!(state.as_ref().map(|o| o.name.clone()));
            }
            if chosen_level.requires_lga() {
                payload["lga_code"] = json!(lga_code);
                payload["lga_name"] = json!(lga.as_ref().map(|o| o.name.clone()));
            }
            if chosen_level.requires_city() {
                payload["city_code"] = json!(city_code);
                payload["city_name"] = json!(city.as_ref().map(|o| o.name.clone()));
            }

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
                        "{}/api/admin/default-pricing/{}",
                        config::get_backend_url(),
                        id
                    )),
                    None => Request::post(&format!(
                        "{}/api/admin/default-pricing",
                        config::get_backend_url()
                    )),
                };
                match request
                    .header("Authorization", &format!("Bearer {}", token))
                    .header("Content-Type", "application/json")
                    .json(&payload)
                    .expect("Failed to serialize pricing entry")
                    .send()
                    .await
                {
                    Ok(response) => match response.json::<ApiEnvelope<serde_json::Value>>().await {
                        Ok(envelope) if envelope.success => navigator.push(&Route::DefaultPricing),
                        Ok(envelope) => submit_error.set(Some(
                            envelope
                                .message
                                .unwrap_or_else(|| "Failed to save pricing entry".to_string()),
                        )),
                        Err(_) => submit_error.set(Some("Failed to parse save response".to_string())),
                    },
                    Err(_) => submit_error.set(Some("Network error saving pricing entry".to_string())),
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
                        {if props.id.is_some() { "Edit Pricing Entry" } else { "New Pricing Entry" }}
                    </h1>
                    <Link<Route> to={Route::DefaultPricing} classes="back-link">
                        {"Back to Default Pricing"}
                    </Link<Route>>
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
                    <label>{"Pricing Level"}</label>
                    <select onchange={on_level}>
                        {
                            PricingLevel::ALL.iter().map(|option| {
                                html! {
                                    <option
                                        value={option.as_str()}
                                        selected={*level == *option}
                                    >
                                        {option.label()}
                                    </option>
                                }
                            }).collect::<Html>()
                        }
                    </select>
                </div>

                <SearchableSelect
                    label="Country"
                    placeholder="Select a country"
                    options={(*countries).clone()}
                    selected={country.as_ref().map(|o| o.code.clone())}
                    on_select={on_country}
                />
                {field_error("country")}

                {
                    if level.requires_state() {
                        html! {
                            <>
                                <SearchableSelect
                                    label="State"
                                    placeholder="Select a state"
                                    options={(*states).clone()}
                                    selected={state.as_ref().map(|o| o.code.clone())}
                                    on_select={on_state}
                                    disabled={country.is_none()}
                                />
                                {field_error("state")}
                            </>
                        }
                    } else {
                        html! {}
                    }
                }

                {
                    if level.requires_lga() {
                        html! {
                            <>
                                <SearchableSelect
                                    label="LGA"
                                    placeholder="Select an LGA"
                                    options={(*lgas).clone()}
                                    selected={lga.as_ref().map(|o| o.code.clone())}
                                    on_select={on_lga}
                                    disabled={state.is_none()}
                                />
                                {field_error("lga")}
                            </>
                        }
                    } else {
                        html! {}
                    }
                }

                {
                    if level.requires_city() {
                        html! {
                            <>
                                <SearchableSelect
                                    label="City"
                                    placeholder="Select a city"
                                    options={(*cities).clone()}
                                    selected={city.as_ref().map(|o| o.code.clone())}
                                    on_select={on_city}
                                    disabled={lga.is_none()}
                                />
                                {field_error("city")}
                            </>
                        }
                    } else {
                        html! {}
                    }
                }

                <div class="form-field">
                    <label>{"Default Fee (₦)"}</label>
                    <input type="number" min="0" value={(*fee).clone()} oninput={on_fee} />
                    {field_error("default_fee")}
                </div>

                <div class="form-field checkbox-field">
                    <label>
                        <input type="checkbox" checked={*is_active} onchange={on_active} />
                        {"Active"}
                    </label>
                </div>

                <button class="primary-button" onclick={submit} disabled={*saving}>
                    {if *saving { "Saving..." } else { "Save Pricing Entry" }}
                </button>
            </div>
        </div>
    }
}

fn zip_option(code: Option<String>, name: Option<String>) -> Option<GeoOption> {
    match (code, name) {
        (Some(code), Some(name)) if !code.is_empty() => Some(GeoOption { code, name }),
        _ => None,
    }
}
