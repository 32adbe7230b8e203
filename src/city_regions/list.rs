use gloo_net::http::Request;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api::envelope::{auth_token, ApiEnvelope};
use crate::city_regions::models::CityRegion;
use crate::components::confirm_modal::ConfirmModal;
use crate::components::notification::{Toast, ToastKind};
use crate::config;
use crate::packages::models::format_amount;
use crate::Route;

#[function_component(CityRegionsPage)]
pub fn city_regions_page() -> Html {
    let regions = use_state(|| Vec::<CityRegion>::new());
    let search = use_state(String::new);
    let error = use_state(|| None::<String>);
    let toast = use_state(|| None::<(String, ToastKind)>);
    let delete_target = use_state(|| None::<CityRegion>);
    let navigator = use_navigator().unwrap();

    {
        let regions = regions.clone();
        let error = error.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    let Some(token) = auth_token() else {
                        error.set(Some("Authentication token not found".to_string()));
                        return;
                    };
                    match Request::get(&format!(
                        "{}/api/admin/city-regions",
                        config::get_backend_url()
                    ))
                    .header("Authorization", &format!("Bearer {}", token))
                    .send()
                    .await
                    {
                        Ok(response) => {
                            if response.ok() {
                                match response.json::<ApiEnvelope<Vec<CityRegion>>>().await {
                                    Ok(envelope) => {
                                        match envelope.into_result("Failed to load city regions") {
                                            Ok(listing) => {
                                                regions.set(listing);
                                                error.set(None);
                                            }
                                            Err(message) => error.set(Some(message)),
                                        }
                                    }
                                    Err(_) => {
                                        error.set(Some("Failed to parse city regions".to_string()))
                                    }
                                }
                            } else {
                                error.set(Some("Failed to load city regions".to_string()));
                            }
                        }
                        Err(_) => error.set(Some("Network error loading city regions".to_string())),
                    }
                });
                || ()
            },
            (),
        );
    }

    let on_search = {
        let search = search.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            search.set(input.value());
        })
    };

    let needle = search.to_lowercase();
    let visible: Vec<CityRegion> = regions
        .iter()
        .filter(|region| needle.is_empty() || region.name.to_lowercase().contains(&needle))
        .cloned()
        .collect();

    let confirm_delete = {
        let delete_target = delete_target.clone();
        let regions = regions.clone();
        let toast = toast.clone();
        Callback::from(move |_| {
            let Some(region) = (*delete_target).clone() else { return };
            delete_target.set(None);
            let Some(id) = region.id.clone() else { return };
            let regions = regions.clone();
            let toast = toast.clone();
            spawn_local(async move {
                let Some(token) = auth_token() else {
                    toast.set(Some(("Authentication token not found".to_string(), ToastKind::Error)));
                    return;
                };
                match Request::delete(&format!(
                    "{}/api/admin/city-regions/{}",
                    config::get_backend_url(),
                    id
                ))
                .header("Authorization", &format!("Bearer {}", token))
                .send()
                .await
                {
                    Ok(response) => {
                        let outcome = match response.json::<ApiEnvelope<serde_json::Value>>().await {
                            Ok(envelope) if envelope.success => Ok(envelope.message),
                            Ok(envelope) => Err(envelope
                                .message
                                .unwrap_or_else(|| "Failed to delete city region".to_string())),
                            Err(_) if response.ok() => Ok(None),
                            Err(_) => Err("Failed to delete city region".to_string()),
                        };
                        match outcome {
                            Ok(message) => {
                                let remaining: Vec<CityRegion> = regions
                                    .iter()
                                    .filter(|r| r.id != region.id)
                                    .cloned()
                                    .collect();
                                regions.set(remaining);
                                toast.set(Some((
                                    message.unwrap_or_else(|| "City region deleted".to_string()),
                                    ToastKind::Success,
                                )));
                            }
                            Err(message) => toast.set(Some((message, ToastKind::Error))),
                        }
                    }
                    Err(_) => toast.set(Some((
                        "Network error deleting city region".to_string(),
                        ToastKind::Error,
                    ))),
                }
            });
        })
    };

    let cancel_delete = {
        let delete_target = delete_target.clone();
        Callback::from(move |_| delete_target.set(None))
    };

    html! {
        <div class="page-container">
            <div class="page-panel">
                <div class="panel-header">
                    <h1 class="panel-title">{"City Regions"}</h1>
                    <Link<Route> to={Route::CityRegionNew} classes="primary-link">
                        {"New City Region"}
                    </Link<Route>>
                </div>

                <input
                    type="text"
                    class="search-input"
                    placeholder="Search by name..."
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
                                        <th>{"Name"}</th>
                                        <th>{"City"}</th>
                                        <th>{"LGA"}</th>
                                        <th>{"State"}</th>
                                        <th>{"Fee"}</th>
                                        <th>{"Actions"}</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {
                                        visible.iter().map(|region| {
                                            let id = region.id.clone().unwrap_or_default();
                                            let edit = {
                                                let navigator = navigator.clone();
                                                let id = id.clone();
                                                Callback::from(move |_: MouseEvent| {
                                                    navigator.push(&Route::CityRegionEdit { id: id.clone() });
                                                })
                                            };
                                            let ask_delete = {
                                                let delete_target = delete_target.clone();
                                                let region = region.clone();
                                                Callback::from(move |_: MouseEvent| {
                                                    delete_target.set(Some(region.clone()));
                                                })
                                            };
                                            html! {
                                                <tr key={id.clone()}>
                                                    <td>{&region.name}</td>
                                                    <td>{&region.city_code}</td>
                                                    <td>{&region.lga_code}</td>
                                                    <td>{&region.state_code}</td>
                                                    <td>{format_amount(region.fee)}</td>
                                                    <td class="row-actions">
                                                        <button class="link-button" onclick={edit}>{"Edit"}</button>
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
            </div>

            {
                if let Some(region) = (*delete_target).as_ref() {
                    html! {
                        <ConfirmModal
                            title="Delete city region"
                            message={format!("Delete \"{}\"? This cannot be undone.", region.name)}
                            confirm_label="Delete"
                            on_confirm={confirm_delete.clone()}
                            on_cancel={cancel_delete.clone()}
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
