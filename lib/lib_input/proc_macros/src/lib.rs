use proc_macro2::{Literal, TokenStream};
use quote::{format_ident, quote};
use venial::{Fields, Item, Struct};

/// Derives `lib_input::InputMapped` for a struct whose fields all implement
/// it, and generates a matching `<Name>Bindings` struct.
#[proc_macro_derive(InputMapped)]
pub fn derive_input_mapped(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    match expand(input.into()) {
        Ok(tokens) => tokens.into(),
        Err(error) => error.to_compile_error().into(),
    }
}

fn expand(input: TokenStream) -> Result<TokenStream, venial::Error> {
    let Item::Struct(item) = venial::parse_item(input)? else {
        return Err(venial::Error::new("InputMapped can only be derived for structs"));
    };

    if item.generic_params.is_some() {
        return Err(venial::Error::new_at_span(
            item.name.span(),
            "InputMapped does not support generic parameters",
        ));
    }

    if !matches!(item.fields, Fields::Named(_)) {
        return Err(venial::Error::new_at_span(
            item.name.span(),
            "InputMapped needs a struct with named fields",
        ));
    }

    let Struct {
        vis_marker, name, ..
    } = &item;

    let field_names = item.field_tokens().into_iter().collect::<Vec<_>>();
    let field_types = item.field_types().into_iter().collect::<Vec<_>>();
    let state_indices = (0..field_names.len())
        .map(Literal::usize_unsuffixed)
        .collect::<Vec<_>>();

    let bindings_name = format_ident!("{name}Bindings");

    Ok(quote! {
        #[derive(Debug, Clone, PartialEq)]
        #vis_marker struct #bindings_name {
            #(pub #field_names: <#field_types as ::lib_input::InputMapped>::Bindings,)*
        }

        impl ::lib_input::InputMapped for #name {
            type Bindings = #bindings_name;
            type MapperState = (#(<#field_types as ::lib_input::InputMapped>::MapperState,)*);

            fn new_mapper(bindings: &Self::Bindings) -> Self::MapperState {
                (#(<#field_types as ::lib_input::InputMapped>::new_mapper(&bindings.#field_names),)*)
            }

            fn mapper_event(
                state: &mut Self::MapperState,
                event: ::lib_input::DeviceEvent,
                ctx: &::lib_input::MapperContext,
            ) {
                #(<#field_types as ::lib_input::InputMapped>::mapper_event(&mut state.#state_indices, event, ctx);)*
            }

            fn map(state: &mut Self::MapperState) -> Self {
                Self {
                    #(#field_names: <#field_types as ::lib_input::InputMapped>::map(&mut state.#state_indices),)*
                }
            }
        }
    })
}
