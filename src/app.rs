use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::spawn_local;
use web_sys::{DataTransfer, DragEvent, File};

use crate::api;
use crate::config::AppConfig;
use crate::controller::{ListingState, Notice, SelectionController};
use crate::error::js_detail;
use crate::preview;
use crate::request::{ConcatOptions, FormValue, Mode, ResizeMode, SaveOption};
use crate::selection::ItemId;

const DRAG_MIME: &str = "text/plain";

fn display_if(visible: bool) -> &'static str {
    if visible { "" } else { "none" }
}

/// Puts a thumbnail id into the drag payload.
pub fn write_drag_id(dt: &DataTransfer, id: ItemId) -> Result<(), JsValue> {
    dt.set_data(DRAG_MIME, &id.to_string())
}

/// The thumbnail id carried by a drag, if it came from one of ours.
pub fn read_drag_id(dt: &DataTransfer) -> Option<ItemId> {
    dt.get_data(DRAG_MIME).ok()?.parse().ok()
}

fn dragged_id(ev: &DragEvent) -> Option<ItemId> {
    read_drag_id(&ev.data_transfer()?)
}

/// One draggable thumbnail. Dropping another thumbnail onto it calls
/// `on_drop` with the dragged id.
fn thumb_view(
    id: ItemId,
    title: String,
    src: String,
    selected: bool,
    on_drop: impl Fn(ItemId) + 'static,
    on_click: impl Fn() + 'static,
) -> impl IntoView {
    let dragging = RwSignal::new(false);
    let over = RwSignal::new(false);

    let class = move || {
        let mut class = String::from("thumb-item");
        if selected {
            class.push_str(" selected");
        }
        if dragging.get() {
            class.push_str(" dragging");
        }
        if over.get() {
            class.push_str(" drag-over");
        }
        class
    };

    view! {
        <div
            class=class
            draggable="true"
            on:dragstart=move |ev: DragEvent| {
                if let Some(dt) = ev.data_transfer()
                    && let Err(err) = write_drag_id(&dt, id)
                {
                    log::debug!("drag payload not set: {}", js_detail(&err));
                }
                dragging.set(true);
            }
            on:dragend=move |_| dragging.set(false)
            on:dragover=move |ev: DragEvent| {
                ev.prevent_default();
                over.set(true);
            }
            on:dragleave=move |_| over.set(false)
            on:drop=move |ev: DragEvent| {
                ev.prevent_default();
                over.set(false);
                if let Some(dragged) = dragged_id(&ev) {
                    on_drop(dragged);
                }
            }
            on:click=move |_| on_click()
        >
            <div class="thumb-inner">
                <img class="thumb-img" src=src alt=title.clone() draggable="false" />
                <div class="thumb-caption">{title}</div>
            </div>
        </div>
    }
}

fn choice<T: FormValue + Send + Sync>(
    options: RwSignal<ConcatOptions>,
    get: fn(&ConcatOptions) -> T,
    set: fn(&mut ConcatOptions, T),
) -> impl IntoView {
    let on_change = move |ev| {
        if let Ok(v) = event_target_value(&ev).parse::<T>() {
            options.update(|o| set(o, v));
        }
    };
    view! {
        <select on:change=on_change>
            {T::ALL
                .iter()
                .map(|&v| {
                    view! {
                        <option value=v.as_str() prop:selected=move || options.with(|o| get(o) == v)>
                            {v.label()}
                        </option>
                    }
                })
                .collect_view()}
        </select>
    }
}

fn text_input(
    options: RwSignal<ConcatOptions>,
    input_type: &'static str,
    placeholder: &'static str,
    get: fn(&ConcatOptions) -> &String,
    set: fn(&mut ConcatOptions) -> &mut String,
) -> impl IntoView {
    view! {
        <input
            type=input_type
            placeholder=placeholder
            prop:value=move || options.with(|o| get(o).clone())
            on:input=move |ev| {
                let value = event_target_value(&ev);
                options.update(|o| *set(o) = value);
            }
        />
    }
}

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let endpoints = StoredValue::new(config.endpoints());
    let file_ref = NodeRef::<leptos::html::Input>::new();

    let state = RwSignal::new_local(SelectionController::<File>::new());
    let options = RwSignal::new(ConcatOptions::default());
    let folder = RwSignal::new(String::new());

    let mode_is = move |m: Mode| state.with(|c| c.mode() == m);

    // file input onchange
    let on_files = move |_| {
        let Some(input) = file_ref.get() else { return };
        let files = input
            .files()
            .map(|f| preview::file_list_to_vec(&f))
            .unwrap_or_default();
        // reset input so selecting the same files again triggers change
        input.set_value("");
        let Some(generation) = state.try_update(|c| c.begin_upload_pick()) else {
            return;
        };
        log::debug!("decoding {} picked files", files.len());
        spawn_local(async move {
            let decoded = preview::decode_all(files).await;
            state.update(|c| {
                c.commit_uploads(generation, decoded);
            });
        });
    };

    let on_list = move |_| {
        let folder = folder.get_untracked();
        let endpoints = endpoints.get_value();
        let Some(generation) = state.try_update(|c| c.begin_listing()) else {
            return;
        };
        spawn_local(async move {
            let result = api::list_folder(&endpoints, &folder).await;
            state.update(|c| {
                c.finish_listing(generation, &folder, result, &endpoints);
            });
        });
    };

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let opts = options.get_untracked();
        let submission = match state.try_update(|c| c.prepare_submission(&opts)) {
            Some(Ok(sub)) => sub,
            Some(Err(err)) => {
                log::debug!("submission not sent: {err}");
                return;
            }
            None => return,
        };
        let endpoints = endpoints.get_value();
        spawn_local(async move {
            let result = api::concatenate(&endpoints, &submission)
                .await
                .and_then(|reply| reply.settle(&submission.download_name, api::download_blob));
            state.update(|c| c.finish_submission(result));
        });
    };

    let upload_thumbs = move || {
        state.with(|c| {
            c.uploads()
                .iter()
                .map(|u| {
                    let id = u.id;
                    thumb_view(
                        id,
                        u.name.clone(),
                        u.preview.clone(),
                        false,
                        move |dragged| {
                            state.update(|c| {
                                c.move_upload_before(dragged, id);
                            })
                        },
                        || {},
                    )
                })
                .collect_view()
        })
    };

    let server_panel = move || {
        state.with(|c| match c.listing_state() {
            ListingState::Idle => ().into_any(),
            ListingState::Loading => view! { <div class="hint">"Loading..."</div> }.into_any(),
            ListingState::Failed(msg) => {
                view! { <div class="error">{msg.clone()}</div> }.into_any()
            }
            ListingState::Empty => {
                view! { <div class="hint">"No images found in folder."</div> }.into_any()
            }
            ListingState::Ready => {
                let thumbs = c
                    .listing()
                    .thumbs
                    .iter()
                    .map(|t| {
                        let id = t.id;
                        thumb_view(
                            id,
                            t.name.clone(),
                            t.thumb_url.clone(),
                            t.selected,
                            move |dragged| {
                                state.update(|c| {
                                    c.move_server_before(dragged, id);
                                })
                            },
                            move || {
                                state.update(|c| {
                                    c.toggle_server(id);
                                })
                            },
                        )
                    })
                    .collect_view();
                view! {
                    <div class="thumbs">{thumbs}</div>
                    <div class="hint">
                        "Click items to toggle selection; drag selected items to reorder."
                    </div>
                }
                .into_any()
            }
        })
    };

    let notice = move || {
        state.with(|c| c.notice().cloned()).map(|n| match n {
            Notice::Error(msg) => view! { <div class="error">{msg}</div> }.into_any(),
            Notice::Success(msg) => view! { <div class="success">{msg}</div> }.into_any(),
        })
    };

    let in_flight = move || state.with(|c| c.in_flight());

    view! {
        <form class="main" on:submit=on_submit>
            <div class="topbar">
                <span class="panel-label">"Source"</span>
                {Mode::ALL
                    .iter()
                    .map(|&m| {
                        view! {
                            <label>
                                <input
                                    type="radio"
                                    name="mode"
                                    value=m.as_str()
                                    prop:checked=move || mode_is(m)
                                    on:change=move |_| state.update(|c| c.set_mode(m))
                                />
                                {m.label()}
                            </label>
                        }
                    })
                    .collect_view()}
            </div>

            <section class="panel" style:display=move || display_if(mode_is(Mode::Upload))>
                <div class="row">
                    <input node_ref=file_ref type="file" accept="image/*" multiple
                        on:change=on_files
                    />
                    <button type="button" on:click=move |_| state.update(|c| c.clear_uploads())>
                        "Clear"
                    </button>
                </div>
                {move || {
                    state
                        .with(|c| c.is_decoding())
                        .then(|| view! { <div class="hint">"Loading previews…"</div> })
                }}
                <div class="thumbs">{upload_thumbs}</div>
            </section>

            <section class="panel" style:display=move || display_if(mode_is(Mode::Server))>
                <div class="row">
                    <label>
                        <span class="panel-label">"Folder"</span>
                        <input
                            type="text"
                            placeholder="images"
                            prop:value=move || folder.get()
                            on:input=move |ev| folder.set(event_target_value(&ev))
                        />
                    </label>
                    <button type="button" on:click=on_list>"List"</button>
                    <button type="button" on:click=move |_| state.update(|c| c.clear_listing())>
                        "Clear"
                    </button>
                </div>
                {server_panel}
            </section>

            <section class="panel options">
                <label>
                    <span class="panel-label">"Orientation"</span>
                    {choice(options, |o| o.orientation, |o, v| o.orientation = v)}
                </label>
                <label>
                    <span class="panel-label">"Alignment"</span>
                    {choice(options, |o| o.alignment, |o, v| o.alignment = v)}
                </label>
                <label>
                    <span class="panel-label">"Resize"</span>
                    {choice(options, |o| o.resize_mode, |o, v| o.resize_mode = v)}
                </label>
                <div
                    class="row"
                    style:display=move || {
                        display_if(options.with(|o| o.resize_mode == ResizeMode::FitMax))
                    }
                >
                    <label>
                        <span class="panel-label">"Max width"</span>
                        {text_input(options, "number", "px", |o| &o.max_width, |o| &mut o.max_width)}
                    </label>
                    <label>
                        <span class="panel-label">"Max height"</span>
                        {text_input(options, "number", "px", |o| &o.max_height, |o| &mut o.max_height)}
                    </label>
                </div>
                <label>
                    <span class="panel-label">"Output name"</span>
                    {text_input(
                        options,
                        "text",
                        "output.png",
                        |o| &o.output_name,
                        |o| &mut o.output_name,
                    )}
                </label>
                <label>
                    <span class="panel-label">"Result"</span>
                    {choice(options, |o| o.save_option, |o, v| o.save_option = v)}
                </label>
                <label style:display=move || {
                    display_if(options.with(|o| o.save_option == SaveOption::Save))
                }>
                    <span class="panel-label">"Save folder"</span>
                    {text_input(
                        options,
                        "text",
                        "outputs",
                        |o| &o.save_folder,
                        |o| &mut o.save_folder,
                    )}
                </label>
            </section>

            <div class="row">
                <button type="submit" prop:disabled=in_flight>
                    {move || if in_flight() { "Working..." } else { "Concatenate" }}
                </button>
            </div>
            <div class="result">{notice}</div>
        </form>
    }
}
