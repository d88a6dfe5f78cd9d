//! Browser checks for the `FormData` handed to `fetch`, preview decoding and
//! the drag payload.
#![cfg(target_arch = "wasm32")]

use images_concat_web::api::form_data;
use images_concat_web::app::{read_drag_id, write_drag_id};
use images_concat_web::preview::decode_all;
use images_concat_web::request::{ConcatOptions, FormField, Submission};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{DataTransfer, File};

wasm_bindgen_test_configure!(run_in_browser);

fn file(name: &str) -> File {
    file_of(name, b"\x89PNG")
}

fn file_of(name: &str, contents: &[u8]) -> File {
    let bytes = js_sys::Uint8Array::from(contents);
    let parts = js_sys::Array::of1(&bytes);
    File::new_with_u8_array_sequence(&parts, name).unwrap()
}

fn all_strings(fd: &web_sys::FormData, name: &str) -> Vec<String> {
    fd.get_all(name)
        .iter()
        .map(|v| v.as_string().unwrap())
        .collect()
}

#[wasm_bindgen_test]
fn upload_parts_keep_list_order_and_filenames() {
    let files = ["c.png", "a.png", "b.png"]
        .iter()
        .map(|n| (n.to_string(), file(n)))
        .collect();
    let sub = Submission::uploads(&ConcatOptions::default(), files);
    let fd = form_data(&sub.fields).unwrap();

    let names: Vec<String> = fd
        .get_all("images")
        .iter()
        .map(|v| v.dyn_into::<File>().unwrap().name())
        .collect();
    assert_eq!(names, vec!["c.png", "a.png", "b.png"]);
    assert_eq!(fd.get("mode").as_string().as_deref(), Some("upload"));
}

#[wasm_bindgen_test]
fn server_fields_are_repeated_in_order() {
    let sub = Submission::<File>::server(
        &ConcatOptions::default(),
        "shots",
        vec!["y.png".into(), "x.png".into()],
    );
    let fd = form_data(&sub.fields).unwrap();

    assert_eq!(all_strings(&fd, "folder"), vec!["shots"]);
    assert_eq!(all_strings(&fd, "selected[]"), vec!["y.png", "x.png"]);
    assert_eq!(all_strings(&fd, "output_name"), vec!["output.png"]);
    assert!(all_strings(&fd, "save_folder").is_empty());
    assert!(
        sub.fields
            .iter()
            .all(|f| matches!(f, FormField::Text { .. }))
    );
}

#[wasm_bindgen_test]
async fn previews_come_back_in_pick_order() {
    // the large file finishes reading last
    let big = vec![0x42u8; 4 << 20];
    let files = vec![file_of("big.png", &big), file("a.png"), file("b.png")];

    let decoded = decode_all(files).await;

    let names: Vec<&str> = decoded.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["big.png", "a.png", "b.png"]);
    assert!(decoded.iter().all(|d| d.preview.starts_with("data:")));
    assert_eq!(decoded[0].file.size(), (4 << 20) as f64);
}

#[wasm_bindgen_test]
fn drag_payload_carries_the_item_id() {
    let dt = DataTransfer::new().unwrap();
    write_drag_id(&dt, 42).unwrap();
    assert_eq!(read_drag_id(&dt), Some(42));

    assert_eq!(read_drag_id(&DataTransfer::new().unwrap()), None);
}
