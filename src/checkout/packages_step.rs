use gloo_net::http::Request;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::api::envelope::ApiEnvelope;
use crate::checkout::models::{CheckoutData, SelectedPackage};
use crate::config;
use crate::packages::models::{format_amount, BillingCycle, SubscriptionPackage};

#[derive(Properties, PartialEq)]
pub struct PackagesStepProps {
    pub data: CheckoutData,
    pub on_change: Callback<CheckoutData>,
    pub on_next: Callback<()>,
}

/// First wizard step: pick one or more packages, each with a billing cycle.
#[function_component(PackagesStep)]
pub fn packages_step(props: &PackagesStepProps) -> Html {
    let available = use_state(|| Vec::<SubscriptionPackage>::new());
    let load_error = use_state(|| None::<String>);

    {
        let available = available.clone();
        let load_error = load_error.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    match Request::get(&format!("{}/api/packages", config::get_backend_url()))
                        .send()
                        .await
                    {
                        Ok(response) => {
                            match response.json::<ApiEnvelope<Vec<SubscriptionPackage>>>().await {
                                Ok(envelope) => {
                                    match envelope.into_result("Failed to load packages") {
                                        Ok(packages) => available.set(
                                            packages.into_iter().filter(|p| p.is_active).collect(),
                                        ),
                                        Err(message) => load_error.set(Some(message)),
                                    }
                                }
                                Err(_) => {
                                    load_error.set(Some("Failed to parse packages".to_string()))
                                }
                            }
                        }
                        Err(_) => load_error.set(Some("Network error loading packages".to_string())),
                    }
                });
                || ()
            },
            (),
        );
    }

    let toggle_package = {
        let data = props.data.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |package: SubscriptionPackage| {
            let Some(package_id) = package.id.clone() else { return };
            let mut updated = data.clone();
            if let Some(position) = updated
                .selected
                .iter()
                .position(|s| s.package_id == package_id)
            {
                updated.selected.remove(position);
            } else {
                updated.selected.push(SelectedPackage {
                    package_id,
                    title: package.title.clone(),
                    cycle: BillingCycle::Monthly,
                    price: package.total_price,
                });
            }
            on_change.emit(updated);
        })
    };

    let change_cycle = {
        let data = props.data.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |(package_id, cycle, price): (String, BillingCycle, f64)| {
            let mut updated = data.clone();
            if let Some(selection) = updated
                .selected
                .iter_mut()
                .find(|s| s.package_id == package_id)
            {
                selection.cycle = cycle;
                selection.price = price;
            }
            on_change.emit(updated);
        })
    };

    let continue_clicked = {
        let on_next = props.on_next.clone();
        Callback::from(move |_: MouseEvent| on_next.emit(()))
    };

    html! {
        <div class="wizard-body">
            {
                if let Some(message) = (*load_error).as_ref() {
                    html! {
                        <div class="info-section error">
                            <span class="error-message">{message}</span>
                        </div>
                    }
                } else {
                    html! {}
                }
            }

            <div class="package-grid">
                {
                    available.iter().map(|package| {
                        let package_id = package.id.clone().unwrap_or_default();
                        let selection = props
                            .data
                            .selected
                            .iter()
                            .find(|s| s.package_id == package_id)
                            .cloned();
                        let toggle = {
                            let toggle_package = toggle_package.clone();
                            let package = package.clone();
                            Callback::from(move |_: MouseEvent| toggle_package.emit(package.clone()))
                        };
                        html! {
                            <div
                                key={package_id.clone()}
                                class={classes!("package-card", selection.is_some().then(|| "selected"))}
                            >
                                <h3>{&package.title}</h3>
                                <p class="package-description">{&package.description}</p>
                                <ul class="package-features">
                                    {
                                        package.features.iter().map(|feature| {
                                            html! { <li key={feature.clone()}>{feature}</li> }
                                        }).collect::<Html>()
                                    }
                                </ul>
                                <div class="package-price">{format_amount(package.total_price)}</div>
                                {
                                    if let Some(selection) = &selection {
                                        let on_cycle = {
                                            let change_cycle = change_cycle.clone();
                                            let package_id = package_id.clone();
                                            let base_price = package.total_price;
                                            Callback::from(move |e: Event| {
                                                let select: HtmlSelectElement = e.target_unchecked_into();
                                                if let Some(cycle) = BillingCycle::from_str(&select.value()) {
                                                    // Per-cycle multiples of the package's computed total.
                                                    let price = match cycle {
                                                        BillingCycle::Monthly => base_price,
                                                        BillingCycle::Quarterly => base_price * 3.0,
                                                        BillingCycle::Yearly => base_price * 12.0,
                                                    };
                                                    change_cycle.emit((package_id.clone(), cycle, price));
                                                }
                                            })
                                        };
                                        html! {
                                            <select onchange={on_cycle}>
                                                {
                                                    BillingCycle::ALL.iter().map(|cycle| {
                                                        html! {
                                                            <option
                                                                value={cycle.as_str()}
                                                                selected={selection.cycle == *cycle}
                                                            >
                                                                {cycle.label()}
                                                            </option>
                                                        }
                                                    }).collect::<Html>()
                                                }
                                            </select>
                                        }
                                    } else {
                                        html! {}
                                    }
                                }
                                <button class="select-button" onclick={toggle}>
                                    {if selection.is_some() { "Remove" } else { "Select" }}
                                </button>
                            </div>
                        }
                    }).collect::<Html>()
                }
            </div>

            <div class="wizard-actions">
                <span class="wizard-total">
                    {format!("Selected: {} — {}", props.data.selected.len(), format_amount(props.data.subscription_total()))}
                </span>
                <button
                    class="primary-button"
                    onclick={continue_clicked}
                    disabled={props.data.selected.is_empty()}
                >
                    {"Continue"}
                </button>
            </div>
        </div>
    }
}
