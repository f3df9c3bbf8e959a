use leptos::prelude::*;

/// Label with an optional required marker
#[component]
fn FieldLabel(#[prop(into)] label: String, for_id: &'static str, required: bool) -> impl IntoView {
    view! {
        <label class="form__label" for=for_id>
            {label}
            {required.then(|| view! { <span class="form__required">" *"</span> })}
        </label>
    }
}

/// Single-line text input bound to a signal value
#[component]
pub fn TextField(
    #[prop(into)] label: String,
    id: &'static str,
    #[prop(into)] value: Signal<String>,
    #[prop(optional)] on_input: Option<Callback<String>>,
    #[prop(optional, into)] placeholder: MaybeProp<String>,
    #[prop(optional)] required: bool,
    /// Rendered read-only, e.g. for system-assigned values
    #[prop(optional)]
    readonly: bool,
) -> impl IntoView {
    let input_placeholder = move || placeholder.get().unwrap_or_default();

    view! {
        <div class="form__group">
            <FieldLabel label=label for_id=id required=required />
            <input
                id=id
                type="text"
                class=if readonly { "form__input form__input--readonly" } else { "form__input" }
                prop:value=move || value.get()
                placeholder=input_placeholder
                readonly=readonly
                on:input=move |ev| {
                    if let Some(handler) = on_input {
                        handler.run(event_target_value(&ev));
                    }
                }
            />
        </div>
    }
}

/// Native date picker; value is yyyy-mm-dd
#[component]
pub fn DateField(
    #[prop(into)] label: String,
    id: &'static str,
    #[prop(into)] value: Signal<String>,
    on_change: Callback<String>,
    #[prop(optional)] required: bool,
) -> impl IntoView {
    view! {
        <div class="form__group">
            <FieldLabel label=label for_id=id required=required />
            <input
                id=id
                type="date"
                class="form__input"
                prop:value=move || value.get()
                on:input=move |ev| on_change.run(event_target_value(&ev))
            />
        </div>
    }
}

/// Select over a fixed option list; an empty value shows the placeholder option
#[component]
pub fn SelectField(
    #[prop(into)] label: String,
    id: &'static str,
    #[prop(into)] value: Signal<String>,
    on_change: Callback<String>,
    options: Vec<String>,
    #[prop(into)] placeholder: String,
    #[prop(optional)] required: bool,
) -> impl IntoView {
    view! {
        <div class="form__group">
            <FieldLabel label=label for_id=id required=required />
            <select
                id=id
                class="form__select"
                prop:value=move || value.get()
                on:change=move |ev| on_change.run(event_target_value(&ev))
            >
                <option value="" disabled=true selected=move || value.get().is_empty()>
                    {placeholder}
                </option>
                {options
                    .into_iter()
                    .map(|opt| {
                        let opt_value = opt.clone();
                        let is_selected = move || value.get() == opt_value;
                        let opt_attr = opt.clone();
                        view! { <option value=opt_attr selected=is_selected>{opt}</option> }
                    })
                    .collect_view()}
            </select>
        </div>
    }
}

#[component]
pub fn TextAreaField(
    #[prop(into)] label: String,
    id: &'static str,
    #[prop(into)] value: Signal<String>,
    on_input: Callback<String>,
    #[prop(optional, into)] placeholder: MaybeProp<String>,
    #[prop(default = 2)] rows: u32,
) -> impl IntoView {
    let textarea_placeholder = move || placeholder.get().unwrap_or_default();

    view! {
        <div class="form__group">
            <FieldLabel label=label for_id=id required=false />
            <textarea
                id=id
                class="form__textarea"
                rows=rows.to_string()
                prop:value=move || value.get()
                placeholder=textarea_placeholder
                on:input=move |ev| on_input.run(event_target_value(&ev))
            />
        </div>
    }
}

/// Read-only numeric cell used for derived columns
#[component]
pub fn ReadonlyCell(#[prop(into)] value: Signal<String>) -> impl IntoView {
    view! { <div class="form__readonly-cell">{move || value.get()}</div> }
}
