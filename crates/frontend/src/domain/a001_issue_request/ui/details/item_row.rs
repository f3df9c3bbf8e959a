use super::view_model::IssueRequestVm;
use crate::shared::components::form_field::ReadonlyCell;
use crate::shared::icons::icon;
use contracts::domain::a001_issue_request::aggregate::ItemField;
use leptos::prelude::*;
use thaw::*;

/// One editable line of the "Items Required" section
#[component]
pub fn ItemRowEditor(vm: IssueRequestVm, index: usize) -> impl IntoView {
    let row = vm.row(index);
    let row_count = vm.row_count();
    let field = move |f: ItemField| Signal::derive(move || {
        row.get().map(|r| r.get(f).to_string()).unwrap_or_default()
    });
    let current_stock =
        Signal::derive(move || row.get().map(|r| r.current_stock).unwrap_or(0.0).to_string());
    let stock_after = Signal::derive(move || {
        row.get().map(|r| r.stock_after_purchase).unwrap_or(0.0).to_string()
    });

    view! {
        <div class="item-row">
            <div class="item-row__header">
                <h4 class="item-row__title">{format!("Item {}", index + 1)}</h4>
                <Show when=move || { row_count.get() > 1 }>
                    <Button
                        appearance=ButtonAppearance::Subtle
                        size=ButtonSize::Small
                        button_type=ButtonType::Button
                        on_click=move |_| vm.remove_row(index)
                        attr:title="Remove item"
                    >
                        {icon("close")}
                    </Button>
                </Show>
            </div>

            <div class="item-row__grid">
                <div class="item-row__cell item-row__cell--serial">
                    <span class="form__label">"S.No"</span>
                    <div class="form__readonly-cell">{index + 1}</div>
                </div>

                <div class="item-row__cell item-row__cell--wide">
                    <label class="form__label" for=format!("itemName-{}", index)>"Item Name"</label>
                    <ItemNameCombobox vm=vm index=index value=field(ItemField::ItemName) />
                </div>

                <div class="item-row__cell">
                    <label class="form__label" for=format!("quantity-{}", index)>"Quantity"</label>
                    <input
                        id=format!("quantity-{}", index)
                        type="number"
                        min="1"
                        class="form__input"
                        placeholder="Enter quantity"
                        prop:value=field(ItemField::Quantity)
                        on:input=move |ev| vm.set_item(index, ItemField::Quantity, event_target_value(&ev))
                    />
                </div>

                <div class="item-row__cell">
                    <label class="form__label" for=format!("au-{}", index)>"A/U"</label>
                    <input
                        id=format!("au-{}", index)
                        type="text"
                        class="form__input"
                        placeholder="Enter A/U"
                        prop:value=field(ItemField::Au)
                        on:input=move |ev| vm.set_item(index, ItemField::Au, event_target_value(&ev))
                    />
                </div>

                <div class="item-row__cell">
                    <span class="form__label">"Current Stock"</span>
                    <ReadonlyCell value=current_stock />
                </div>

                <div class="item-row__cell">
                    <span class="form__label">"Stock After"</span>
                    <ReadonlyCell value=stock_after />
                </div>

                <div class="item-row__cell item-row__cell--wide">
                    <label class="form__label" for=format!("remarks-{}", index)>"Remarks"</label>
                    <input
                        id=format!("remarks-{}", index)
                        type="text"
                        class="form__input"
                        placeholder="Enter remarks"
                        prop:value=field(ItemField::Remarks)
                        on:input=move |ev| vm.set_item(index, ItemField::Remarks, event_target_value(&ev))
                    />
                </div>
            </div>
        </div>
    }
}

/// Free-text item name with catalog suggestions underneath.
/// Typing is never restricted to the catalog.
#[component]
fn ItemNameCombobox(vm: IssueRequestVm, index: usize, value: Signal<String>) -> impl IntoView {
    let is_open = vm.is_dropdown_open(index);
    let suggestions = vm.suggestions(index);

    view! {
        <div class="combobox">
            <input
                id=format!("itemName-{}", index)
                type="text"
                class="form__input combobox__input"
                placeholder="Enter product name"
                autocomplete="off"
                prop:value=value
                on:input=move |ev| {
                    vm.set_item(index, ItemField::ItemName, event_target_value(&ev));
                    vm.set_dropdown_open(index, true);
                }
                on:focus=move |_| vm.set_dropdown_open(index, true)
                on:blur=move |_| vm.set_dropdown_open(index, false)
                on:keydown=move |ev| {
                    if ev.key() == "Escape" {
                        vm.set_dropdown_open(index, false);
                    }
                }
            />
            <span class="combobox__chevron">{icon("chevrons-up-down")}</span>

            <Show when=move || is_open.get()>
                <ul class="combobox__list" role="listbox">
                    {move || {
                        let items = suggestions.get();
                        if items.is_empty() {
                            return view! { <li class="combobox__empty">"No item found."</li> }.into_any();
                        }
                        let current = value.get();
                        items
                            .into_iter()
                            .map(|name| {
                                let selected = name == current;
                                let picked = name.clone();
                                let class = if selected {
                                    "combobox__option combobox__option--selected"
                                } else {
                                    "combobox__option"
                                };
                                // mousedown fires before the input's blur closes the list
                                view! {
                                    <li
                                        class=class
                                        role="option"
                                        aria-selected=selected.to_string()
                                        on:mousedown=move |ev| {
                                            ev.prevent_default();
                                            vm.select_suggestion(index, picked.clone());
                                        }
                                    >
                                        <span class="combobox__check">{if selected { "✓" } else { "" }}</span>
                                        {name}
                                    </li>
                                }
                            })
                            .collect_view()
                            .into_any()
                    }}
                </ul>
            </Show>
        </div>
    }
}
