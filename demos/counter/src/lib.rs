#![allow(non_snake_case)]

use tin::{view, Element, Props, Scope};
use wasm_bindgen::prelude::*;

mod classes {
    pub const CONTAINER: &str = concat!(
        "flex flex-col items-center justify-center min-h-screen ",
        "bg-gray-100 dark:bg-gray-900 w-full"
    );
    pub const CARD: &str = "bg-white dark:bg-gray-800 p-8 rounded-lg shadow-md w-full max-w-md";
    pub const HEADING: &str =
        "text-2xl font-semibold mb-4 text-center text-gray-800 dark:text-gray-200";
    pub const COUNT: &str = "text-4xl font-bold text-center mb-6 text-gray-900 dark:text-gray-100";
    pub const BUTTONS: &str = "flex justify-center space-x-4";
    pub const BUTTON: &str = "px-4 py-2 rounded-md transition-colors duration-200";
    pub const INCREMENT: &str = "bg-blue-500 hover:bg-blue-600 text-white";
    pub const DECREMENT: &str = "bg-red-500 hover:bg-red-600 text-white";
    pub const RESET: &str = "bg-gray-300 hover:bg-gray-400 text-gray-800";
}

/// A `<button>` forwarding all props, with the base button classes prepended.
fn Button(cx: Scope<'_>) -> tin::Result<Element> {
    let class = format!(
        "{} {}",
        classes::BUTTON,
        cx.props().get_str("className").unwrap_or_default()
    );
    let mut props: Props = cx.props().clone();
    props.insert("className", class);

    Ok(tin::create_element("button", props, cx.children().to_vec()))
}

fn Counter(cx: Scope<'_>) -> tin::Result<Element> {
    let (count, set_count) = cx.use_state(0u64)?;

    let increment = set_count.clone();
    let decrement = set_count.clone();
    let reset = set_count;

    Ok(view! {
        div(className=classes::CONTAINER) [
            div(className=classes::CARD) [
                h2(className=classes::HEADING) [ "Counter" ]
                div(className=classes::COUNT) [ {count} ]
                div(className=classes::BUTTONS) [
                    Button(
                        className=classes::INCREMENT
                        onClick=move |_| increment.set(count + 1)
                    ) [ "Increment" ]
                    Button(
                        className=classes::DECREMENT
                        onClick=move |_| decrement.set(count.saturating_sub(1))
                    ) [ "Decrement" ]
                    Button(
                        className=classes::RESET
                        onClick=move |_| reset.set(0)
                    ) [ "Reset" ]
                ]
            ]
        ]
    })
}

#[wasm_bindgen(start)]
pub fn main() {
    tracing_wasm::set_as_global_default_with_config(tracing_wasm::WASMLayerConfig {
        report_logs_in_console: true,
        report_logs_in_timings: false,
        use_console_color: false,
    });
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));

    let doc = tin::web::document().expect("no document");
    let root = match doc.get_element_by_id("root") {
        Some(root) => root,
        None => {
            let root = doc.create_element("div").unwrap();
            root.set_id("root");
            doc.body().unwrap().append_child(&root).unwrap();
            root
        }
    };

    if let Err(err) = tin::launch(view! { Counter }, root) {
        tracing::error!(error=%err, "could not launch counter");
    }
}
