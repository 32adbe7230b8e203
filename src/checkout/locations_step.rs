use gloo_console::log;
use gloo_net::http::Request;
use serde_json::json;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement, Url};
use yew::prelude::*;

use crate::api::envelope::{auth_token, ApiEnvelope};
use crate::api::geo::{
    fetch_cities, fetch_city_regions, fetch_countries, fetch_lgas, fetch_states, GeoOption,
    RequestSeq,
};
use crate::api::pricing::{resolve_verification_fee, LocationQuery, ResolvedFee};
use crate::checkout::machine::StepError;
use crate::checkout::models::{
    gallery_limit, CheckoutData, LocationDraft, LocationKind, MediaItem, MediaKind,
};
use crate::config;
use crate::packages::models::format_amount;

#[derive(Properties, PartialEq)]
pub struct LocationsStepProps {
    pub data: CheckoutData,
    pub organization_id: Option<String>,
    pub on_change: Callback<CheckoutData>,
    pub on_next: Callback<()>,
    pub on_back: Callback<()>,
    pub on_error: Callback<Option<String>>,
}

/// Third wizard step: assemble the organization's physical locations.
/// Unverified organizations are held to a single headquarters entry.
#[function_component(LocationsStep)]
pub fn locations_step(props: &LocationsStepProps) -> Html {
    let single_location_only = !props.data.profile.is_verified();

    let add_location = {
        let data = props.data.clone();
        let on_change = props.on_change.clone();
        let on_error = props.on_error.clone();
        Callback::from(move |_: MouseEvent| {
            if single_location_only && !data.locations.is_empty() {
                on_error.emit(Some(
                    "Unverified organizations can register exactly one location. Verify your organization to add branches".to_string(),
                ));
                return;
            }
            on_error.emit(None);
            let mut updated = data.clone();
            let id = updated.allocate_location_id();
            let kind = if updated.locations.is_empty() {
                LocationKind::Headquarters
            } else {
                LocationKind::Branch
            };
            updated.locations.push(LocationDraft::new(id, kind));
            on_change.emit(updated);
        })
    };

    let update_location = {
        let data = props.data.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |draft: LocationDraft| {
            let mut updated = data.clone();
            if let Some(slot) = updated.locations.iter_mut().find(|l| l.id == draft.id) {
                *slot = draft;
            }
            on_change.emit(updated);
        })
    };

    let remove_location = {
        let data = props.data.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |id: u64| {
            let mut updated = data.clone();
            updated.locations.retain(|location| location.id != id);
            on_change.emit(updated);
        })
    };

    // Resolution lands here so the no-clobber check runs against the latest
    // draft state, not the snapshot the fetch started from.
    let fee_resolved = {
        let data = props.data.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |(id, resolved): (u64, ResolvedFee)| {
            let mut updated = data.clone();
            if let Some(location) = updated.locations.iter_mut().find(|l| l.id == id) {
                if location.apply_resolved_fee(resolved) {
                    on_change.emit(updated);
                }
            }
        })
    };

    // "Save location" round-trip. The count rule is enforced before any
    // network call goes out.
    let save_location = {
        let data = props.data.clone();
        let on_change = props.on_change.clone();
        let on_error = props.on_error.clone();
        let organization_id = props.organization_id.clone();
        Callback::from(move |id: u64| {
            let Some(draft) = data.locations.iter().find(|l| l.id == id).cloned() else {
                return;
            };
            if !data.profile.is_verified() {
                if data.locations.len() > 1 {
                    on_error.emit(Some(StepError::UnverifiedLocationLimit.to_string()));
                    return;
                }
                if draft.kind != LocationKind::Headquarters {
                    on_error.emit(Some(StepError::UnverifiedNeedsHeadquarters.to_string()));
                    return;
                }
            }
            let missing = draft.missing_required_fields();
            if !missing.is_empty() {
                on_error.emit(Some(format!(
                    "Complete the required location fields: {}",
                    missing.join(", ")
                )));
                return;
            }
            on_error.emit(None);

            let data = data.clone();
            let on_change = on_change.clone();
            let on_error = on_error.clone();
            let organization_id = organization_id.clone();
            spawn_local(async move {
                let Some(token) = auth_token() else {
                    on_error.emit(Some("Authentication token not found".to_string()));
                    return;
                };
                let Some(organization_id) = organization_id else {
                    on_error.emit(Some("Organization profile has not been saved yet".to_string()));
                    return;
                };
                let media: Vec<serde_json::Value> = draft
                    .media
                    .iter()
                    .map(|item| match item {
                        MediaItem::Upload { name, object_url, kind } => json!({
                            "upload": name,
                            "preview": object_url,
                            "kind": media_kind_str(kind),
                        }),
                        MediaItem::Existing { url, kind } => json!({
                            "url": url,
                            "kind": media_kind_str(kind),
                        }),
                    })
                    .collect();
                let payload = json!({
                    "kind": match draft.kind {
                        LocationKind::Headquarters => "headquarters",
                        LocationKind::Branch => "branch",
                    },
                    "brand_name": draft.brand_name.trim(),
                    "country_code": draft.country_code,
                    "state_code": draft.state_code,
                    "lga_code": draft.lga_code,
                    "city_code": draft.city_code,
                    "city_region_code": draft.city_region_code,
                    "house_number": draft.house_number.trim(),
                    "street": draft.street.trim(),
                    "landmark": draft.landmark.trim(),
                    "city_region_fee": draft.city_region_fee,
                    "pricing_source": draft.pricing_source,
                    "media": media,
                });
                match Request::post(&format!(
                    "{}/api/organizations/{}/locations",
                    config::get_backend_url(),
                    organization_id
                ))
                .header("Authorization", &format!("Bearer {}", token))
                .header("Content-Type", "application/json")
                .json(&payload)
                .expect("Failed to serialize location")
                .send()
                .await
                {
                    Ok(response) => match response.json::<ApiEnvelope<serde_json::Value>>().await {
                        Ok(envelope) if envelope.success => {
                            let mut updated = data.clone();
                            if let Some(slot) =
                                updated.locations.iter_mut().find(|l| l.id == draft.id)
                            {
                                slot.saved = true;
                            }
                            on_change.emit(updated);
                        }
                        Ok(envelope) => on_error.emit(Some(
                            envelope
                                .message
                                .unwrap_or_else(|| "Failed to save location".to_string()),
                        )),
                        Err(_) => on_error.emit(Some("Failed to parse location response".to_string())),
                    },
                    Err(_) => on_error.emit(Some("Network error saving location".to_string())),
                }
            });
        })
    };

    let next = {
        let on_next = props.on_next.clone();
        Callback::from(move |_: MouseEvent| on_next.emit(()))
    };
    let back = {
        let on_back = props.on_back.clone();
        Callback::from(move |_: MouseEvent| on_back.emit(()))
    };

    let verification_status = props.data.profile.verification_status;

    html! {
        <div class="wizard-body">
            {
                props.data.locations.iter().map(|draft| {
                    html! {
                        <LocationEditor
                            key={draft.id}
                            draft={draft.clone()}
                            gallery_capacity={gallery_limit(verification_status)}
                            allow_branch={!single_location_only}
                            on_update={update_location.clone()}
                            on_remove={remove_location.clone()}
                            on_save={save_location.clone()}
                            on_fee_resolved={fee_resolved.clone()}
                        />
                    }
                }).collect::<Html>()
            }

            <button class="secondary-button" onclick={add_location}>
                {"Add Location"}
            </button>
            {
                if single_location_only {
                    html! {
                        <p class="field-hint">
                            {"Unverified organizations register a single headquarters location."}
                        </p>
                    }
                } else {
                    html! {}
                }
            }

            <div class="wizard-actions">
                <button class="secondary-button" onclick={back}>{"Back"}</button>
                <button class="primary-button" onclick={next}>{"Continue"}</button>
            </div>
        </div>
    }
}

fn media_kind_str(kind: &MediaKind) -> &'static str {
    match kind {
        MediaKind::Image => "image",
        MediaKind::Video => "video",
    }
}

#[derive(Properties, PartialEq)]
struct LocationEditorProps {
    draft: LocationDraft,
    gallery_capacity: usize,
    allow_branch: bool,
    on_update: Callback<LocationDraft>,
    on_remove: Callback<u64>,
    on_save: Callback<u64>,
    on_fee_resolved: Callback<(u64, ResolvedFee)>,
}

/// One location's editor. Owns its dropdown option lists and sequencing, so
/// state never leaks between locations when drafts are added or removed.
#[function_component(LocationEditor)]
fn location_editor(props: &LocationEditorProps) -> Html {
    let countries = use_state(|| Vec::<GeoOption>::new());
    let states = use_state(|| Vec::<GeoOption>::new());
    let lgas = use_state(|| Vec::<GeoOption>::new());
    let cities = use_state(|| Vec::<GeoOption>::new());
    let regions = use_state(|| Vec::<GeoOption>::new());

    let state_seq = use_mut_ref(RequestSeq::new);
    let lga_seq = use_mut_ref(RequestSeq::new);
    let city_seq = use_mut_ref(RequestSeq::new);
    let region_seq = use_mut_ref(RequestSeq::new);

    let media_url = use_state(String::new);
    let media_kind = use_state(|| MediaKind::Image);
    let gallery_error = use_state(|| None::<String>);

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

    let draft = props.draft.clone();

    // Triggered after city or city-region selection; skipped entirely when a
    // fee is already present.
    let maybe_resolve = {
        let on_fee_resolved = props.on_fee_resolved.clone();
        Callback::from(move |draft: LocationDraft| {
            if draft.has_fee() || draft.city_code.is_empty() {
                return;
            }
            let query = LocationQuery {
                country: draft.country_code.clone(),
                state: draft.state_code.clone(),
                lga: (!draft.lga_code.is_empty()).then(|| draft.lga_code.clone()),
                city: draft.city_code.clone(),
                city_region: (!draft.city_region_code.is_empty())
                    .then(|| draft.city_region_code.clone()),
            };
            let on_fee_resolved = on_fee_resolved.clone();
            let id = draft.id;
            spawn_local(async move {
                let resolved = resolve_verification_fee(&query).await;
                on_fee_resolved.emit((id, resolved));
            });
        })
    };

    let on_kind = {
        let draft = draft.clone();
        let on_update = props.on_update.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let mut updated = draft.clone();
            updated.kind = if select.value() == "branch" {
                LocationKind::Branch
            } else {
                LocationKind::Headquarters
            };
            on_update.emit(updated);
        })
    };

    let text_field = |set: fn(&mut LocationDraft, String)| {
        let draft = draft.clone();
        let on_update = props.on_update.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut updated = draft.clone();
            set(&mut updated, input.value());
            on_update.emit(updated);
        })
    };

    let on_brand = text_field(|d, v| d.brand_name = v);
    let on_house = text_field(|d, v| d.house_number = v);
    let on_street = text_field(|d, v| d.street = v);
    let on_landmark = text_field(|d, v| d.landmark = v);

    let on_country = {
        let draft = draft.clone();
        let on_update = props.on_update.clone();
        let states = states.clone();
        let lgas = lgas.clone();
        let cities = cities.clone();
        let regions = regions.clone();
        let state_seq = state_seq.clone();
        Callback::from(move |option: GeoOption| {
            let mut updated = draft.clone();
            updated.country_code = option.code.clone();
            updated.country_name = option.name.clone();
            updated.state_code = String::new();
            updated.state_name = String::new();
            updated.lga_code = String::new();
            updated.lga_name = String::new();
            updated.city_code = String::new();
            updated.city_name = String::new();
            updated.city_region_code = String::new();
            updated.city_region_name = String::new();
            on_update.emit(updated);
            lgas.set(Vec::new());
            cities.set(Vec::new());
            regions.set(Vec::new());
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
        let draft = draft.clone();
        let on_update = props.on_update.clone();
        let lgas = lgas.clone();
        let cities = cities.clone();
        let regions = regions.clone();
        let lga_seq = lga_seq.clone();
        Callback::from(move |option: GeoOption| {
            let mut updated = draft.clone();
            updated.state_code = option.code.clone();
            updated.state_name = option.name.clone();
            updated.lga_code = String::new();
            updated.lga_name = String::new();
            updated.city_code = String::new();
            updated.city_name = String::new();
            updated.city_region_code = String::new();
            updated.city_region_name = String::new();
            let country_code = updated.country_code.clone();
            on_update.emit(updated);
            cities.set(Vec::new());
            regions.set(Vec::new());
            let lgas = lgas.clone();
            let ticket = lga_seq.borrow().begin();
            let seq = lga_seq.borrow().clone();
            spawn_local(async move {
                match fetch_lgas(&country_code, &option.code).await {
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
        let draft = draft.clone();
        let on_update = props.on_update.clone();
        let cities = cities.clone();
        let regions = regions.clone();
        let city_seq = city_seq.clone();
        Callback::from(move |option: GeoOption| {
            let mut updated = draft.clone();
            updated.lga_code = option.code.clone();
            updated.lga_name = option.name.clone();
            updated.city_code = String::new();
            updated.city_name = String::new();
            updated.city_region_code = String::new();
            updated.city_region_name = String::new();
            let country_code = updated.country_code.clone();
            let state_code = updated.state_code.clone();
            on_update.emit(updated);
            regions.set(Vec::new());
            let cities = cities.clone();
            let ticket = city_seq.borrow().begin();
            let seq = city_seq.borrow().clone();
            spawn_local(async move {
                match fetch_cities(&country_code, &state_code, Some(&option.code)).await {
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
        let draft = draft.clone();
        let on_update = props.on_update.clone();
        let regions = regions.clone();
        let region_seq = region_seq.clone();
        let maybe_resolve = maybe_resolve.clone();
        Callback::from(move |option: GeoOption| {
            let mut updated = draft.clone();
            updated.city_code = option.code.clone();
            updated.city_name = option.name.clone();
            updated.city_region_code = String::new();
            updated.city_region_name = String::new();
            let country_code = updated.country_code.clone();
            let state_code = updated.state_code.clone();
            on_update.emit(updated.clone());
            maybe_resolve.emit(updated);
            let regions = regions.clone();
            let ticket = region_seq.borrow().begin();
            let seq = region_seq.borrow().clone();
            spawn_local(async move {
                match fetch_city_regions(&country_code, &state_code, &option.code).await {
                    Ok(options) => {
                        if seq.is_current(ticket) {
                            regions.set(options);
                        }
                    }
                    Err(message) => log!("city regions load failed:", message),
                }
            });
        })
    };

    let on_region = {
        let draft = draft.clone();
        let on_update = props.on_update.clone();
        let maybe_resolve = maybe_resolve.clone();
        Callback::from(move |option: GeoOption| {
            let mut updated = draft.clone();
            updated.city_region_code = option.code.clone();
            updated.city_region_name = option.name.clone();
            on_update.emit(updated.clone());
            maybe_resolve.emit(updated);
        })
    };

    let on_manual_fee = {
        let draft = draft.clone();
        let on_update = props.on_update.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Ok(fee) = input.value().parse::<f64>() {
                if fee > 0.0 {
                    let mut updated = draft.clone();
                    updated.set_manual_fee(fee);
                    on_update.emit(updated);
                }
            }
        })
    };

    let on_media_url = {
        let media_url = media_url.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            media_url.set(input.value());
        })
    };

    let on_media_kind = {
        let media_kind = media_kind.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            media_kind.set(if select.value() == "video" {
                MediaKind::Video
            } else {
                MediaKind::Image
            });
        })
    };

    let add_media_url = {
        let draft = draft.clone();
        let on_update = props.on_update.clone();
        let media_url = media_url.clone();
        let media_kind = media_kind.clone();
        let gallery_error = gallery_error.clone();
        let capacity = props.gallery_capacity;
        Callback::from(move |_: MouseEvent| {
            let url = media_url.trim().to_string();
            if url.is_empty() {
                return;
            }
            if draft.media.len() >= capacity {
                gallery_error.set(Some(format!("Gallery is limited to {} items", capacity)));
                return;
            }
            gallery_error.set(None);
            let mut updated = draft.clone();
            updated.media.push(MediaItem::Existing { url, kind: (*media_kind).clone() });
            on_update.emit(updated);
            media_url.set(String::new());
        })
    };

    let add_media_file = {
        let draft = draft.clone();
        let on_update = props.on_update.clone();
        let media_kind = media_kind.clone();
        let gallery_error = gallery_error.clone();
        let capacity = props.gallery_capacity;
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let Some(files) = input.files() else { return };
            let Some(file) = files.get(0) else { return };
            if draft.media.len() >= capacity {
                gallery_error.set(Some(format!("Gallery is limited to {} items", capacity)));
                return;
            }
            gallery_error.set(None);
            let object_url = Url::create_object_url_with_blob(&file).unwrap_or_default();
            let mut updated = draft.clone();
            updated.media.push(MediaItem::Upload {
                name: file.name(),
                object_url,
                kind: (*media_kind).clone(),
            });
            on_update.emit(updated);
            input.set_value("");
        })
    };

    let remove_media = {
        let draft = draft.clone();
        let on_update = props.on_update.clone();
        Callback::from(move |index: usize| {
            let mut updated = draft.clone();
            updated.media.remove(index);
            on_update.emit(updated);
        })
    };

    let remove = {
        let on_remove = props.on_remove.clone();
        let id = draft.id;
        Callback::from(move |_: MouseEvent| on_remove.emit(id))
    };
    let save = {
        let on_save = props.on_save.clone();
        let id = draft.id;
        Callback::from(move |_: MouseEvent| on_save.emit(id))
    };

    html! {
        <div class="location-card">
            <div class="location-header">
                <select onchange={on_kind} disabled={!props.allow_branch}>
                    <option value="headquarters" selected={draft.kind == LocationKind::Headquarters}>
                        {"Headquarters"}
                    </option>
                    <option value="branch" selected={draft.kind == LocationKind::Branch}>
                        {"Branch"}
                    </option>
                </select>
                {
                    if draft.saved {
                        html! { <span class="badge active">{"Saved"}</span> }
                    } else {
                        html! { <span class="badge inactive">{"Unsaved"}</span> }
                    }
                }
                <button class="link-button danger" onclick={remove}>{"Remove"}</button>
            </div>

            <div class="form-field">
                <label>{"Brand Name"}</label>
                <input type="text" value={draft.brand_name.clone()} oninput={on_brand} />
            </div>

            <SearchableSelectRow
                countries={(*countries).clone()}
                states={(*states).clone()}
                lgas={(*lgas).clone()}
                cities={(*cities).clone()}
                regions={(*regions).clone()}
                draft={draft.clone()}
                on_country={on_country}
                on_state={on_state}
                on_lga={on_lga}
                on_city={on_city}
                on_region={on_region}
            />

            <div class="form-row">
                <div class="form-field">
                    <label>{"House Number"}</label>
                    <input type="text" value={draft.house_number.clone()} oninput={on_house} />
                </div>
                <div class="form-field">
                    <label>{"Street"}</label>
                    <input type="text" value={draft.street.clone()} oninput={on_street} />
                </div>
            </div>
            <div class="form-field">
                <label>{"Landmark (optional)"}</label>
                <input type="text" value={draft.landmark.clone()} oninput={on_landmark} />
            </div>

            <div class="form-field fee-field">
                <label>{"Verification Fee"}</label>
                {
                    if let Some(fee) = draft.city_region_fee {
                        html! {
                            <div class="fee-display">
                                <strong>{format_amount(fee)}</strong>
                                <span class="fee-source">
                                    {draft.pricing_source.clone().unwrap_or_default()}
                                </span>
                            </div>
                        }
                    } else {
                        html! {
                            <input
                                type="number"
                                min="0"
                                placeholder="Resolved automatically, or enter manually"
                                onchange={on_manual_fee}
                            />
                        }
                    }
                }
            </div>

            <div class="form-field">
                <label>{format!("Gallery ({}/{})", draft.media.len(), props.gallery_capacity)}</label>
                <div class="media-add">
                    <select onchange={on_media_kind}>
                        <option value="image" selected={*media_kind == MediaKind::Image}>{"Image"}</option>
                        <option value="video" selected={*media_kind == MediaKind::Video}>{"Video"}</option>
                    </select>
                    <input
                        type="text"
                        placeholder="Existing media URL..."
                        value={(*media_url).clone()}
                        oninput={on_media_url}
                    />
                    <button type="button" onclick={add_media_url}>{"Add URL"}</button>
                    <input type="file" accept="image/*,video/*" onchange={add_media_file} />
                </div>
                {
                    if let Some(message) = (*gallery_error).as_ref() {
                        html! { <span class="field-error">{message}</span> }
                    } else {
                        html! {}
                    }
                }
                <ul class="media-list">
                    {
                        draft.media.iter().enumerate().map(|(index, item)| {
                            let label = match item {
                                MediaItem::Upload { name, .. } => format!("Upload: {}", name),
                                MediaItem::Existing { url, .. } => url.clone(),
                            };
                            let remove = {
                                let remove_media = remove_media.clone();
                                Callback::from(move |_: MouseEvent| remove_media.emit(index))
                            };
                            html! {
                                <li key={index}>
                                    {label}
                                    <button type="button" class="link-button danger" onclick={remove}>
                                        {"Remove"}
                                    </button>
                                </li>
                            }
                        }).collect::<Html>()
                    }
                </ul>
            </div>

            <button class="primary-button" onclick={save} disabled={draft.saved}>
                {if draft.saved { "Saved" } else { "Save Location" }}
            </button>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct SearchableSelectRowProps {
    countries: Vec<GeoOption>,
    states: Vec<GeoOption>,
    lgas: Vec<GeoOption>,
    cities: Vec<GeoOption>,
    regions: Vec<GeoOption>,
    draft: LocationDraft,
    on_country: Callback<GeoOption>,
    on_state: Callback<GeoOption>,
    on_lga: Callback<GeoOption>,
    on_city: Callback<GeoOption>,
    on_region: Callback<GeoOption>,
}

#[function_component(SearchableSelectRow)]
fn searchable_select_row(props: &SearchableSelectRowProps) -> Html {
    use crate::components::searchable_select::SearchableSelect;
    let draft = &props.draft;
    html! {
        <>
            <div class="form-row">
                <SearchableSelect
                    label="Country"
                    placeholder="Select a country"
                    options={props.countries.clone()}
                    selected={(!draft.country_code.is_empty()).then(|| draft.country_code.clone())}
                    on_select={props.on_country.clone()}
                />
                <SearchableSelect
                    label="State"
                    placeholder="Select a state"
                    options={props.states.clone()}
                    selected={(!draft.state_code.is_empty()).then(|| draft.state_code.clone())}
                    on_select={props.on_state.clone()}
                    disabled={draft.country_code.is_empty()}
                />
            </div>
            <div class="form-row">
                <SearchableSelect
                    label="LGA"
                    placeholder="Select an LGA"
                    options={props.lgas.clone()}
                    selected={(!draft.lga_code.is_empty()).then(|| draft.lga_code.clone())}
                    on_select={props.on_lga.clone()}
                    disabled={draft.state_code.is_empty()}
                />
                <SearchableSelect
                    label="City"
                    placeholder="Select a city"
                    options={props.cities.clone()}
                    selected={(!draft.city_code.is_empty()).then(|| draft.city_code.clone())}
                    on_select={props.on_city.clone()}
                    disabled={draft.lga_code.is_empty()}
                />
            </div>
            <SearchableSelect
                label="City Region (optional)"
                placeholder="Select a city region"
                options={props.regions.clone()}
                selected={(!draft.city_region_code.is_empty()).then(|| draft.city_region_code.clone())}
                on_select={props.on_region.clone()}
                disabled={draft.city_code.is_empty()}
            />
        </>
    }
}
