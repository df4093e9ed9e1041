use proc_macro::TokenStream;

#[proc_macro]
pub fn struct_pack_impl_for_num(item: TokenStream) -> TokenStream {
    let i = syn::parse_macro_input!(item as syn::Ident);
    let output = quote::quote! {
        impl StructUnpack for #i {
            fn unpack<R: Read>(mut reader: R) -> Result<Self> {
                let mut buf = [0u8; std::mem::size_of::<#i>()];
                reader.read_exact(&mut buf)?;
                Ok(#i::from_le_bytes(buf))
            }
        }

        impl StructPack for #i {
            fn pack<W: Write>(&self, writer: &mut W) -> Result<()> {
                writer.write_all(&self.to_le_bytes())?;
                Ok(())
            }
        }
    };
    output.into()
}

fn has_attr(field: &syn::Field, name: &str) -> bool {
    field.attrs.iter().any(|attr| attr.path().is_ident(name))
}

fn field_accessor(field: &syn::Field, index: usize) -> proc_macro2::TokenStream {
    match &field.ident {
        Some(ident) => quote::quote! { #ident },
        None => {
            let idx = syn::Index::from(index);
            quote::quote! { #idx }
        }
    }
}

/// Macro to derive `StructPack` trait for structs.
///
/// Fields are written in declaration order, little-endian, with no padding.
///
/// make sure to import the necessary imports:
/// ```ignore
/// use crate::utils::struct_pack::*;
/// use anyhow::Result;
/// use std::io::{Read, Write};
/// ```
///
/// * `skip_pack` attribute can be used to skip fields from packing.
#[proc_macro_derive(StructPack, attributes(skip_pack))]
pub fn struct_pack_derive(input: TokenStream) -> TokenStream {
    let sut = syn::parse_macro_input!(input as syn::ItemStruct);
    let name = sut.ident;
    let fields = sut.fields.iter().enumerate().map(|(index, field)| {
        if has_attr(field, "skip_pack") {
            return quote::quote! {};
        }
        let field_name = field_accessor(field, index);
        quote::quote! {
            self.#field_name.pack(writer)?;
        }
    });
    let output = quote::quote! {
        impl StructPack for #name {
            fn pack<W: Write>(&self, writer: &mut W) -> Result<()> {
                #(#fields)*
                Ok(())
            }
        }
    };
    output.into()
}

/// Macro to derive `StructUnpack` trait for structs.
///
/// make sure to import the necessary imports:
/// ```ignore
/// use crate::utils::struct_pack::*;
/// use anyhow::Result;
/// use std::io::{Read, Write};
/// ```
///
/// * `skip_unpack` attribute can be used to skip fields from unpacking.
/// Skipped fields are filled with `Default::default()`.
#[proc_macro_derive(StructUnpack, attributes(skip_unpack))]
pub fn struct_unpack_derive(input: TokenStream) -> TokenStream {
    let sut = syn::parse_macro_input!(input as syn::ItemStruct);
    let name = sut.ident;
    let is_tuple_struct = matches!(sut.fields, syn::Fields::Unnamed(_));
    let mut idents = Vec::new();
    let smts: Vec<_> = sut
        .fields
        .iter()
        .enumerate()
        .map(|(index, field)| {
            let ident = match &field.ident {
                Some(ident) => ident.clone(),
                None => quote::format_ident!("field_{}", index),
            };
            idents.push(ident.clone());
            let field_type = &field.ty;
            if has_attr(field, "skip_unpack") {
                return quote::quote! {
                    let #ident: #field_type = Default::default();
                };
            }
            quote::quote! {
                let #ident = <#field_type as StructUnpack>::unpack(&mut reader)?;
            }
        })
        .collect();
    let fields = if is_tuple_struct {
        quote::quote! { ( #(#idents),* ) }
    } else {
        quote::quote! { { #(#idents),* } }
    };
    let output = quote::quote! {
        impl StructUnpack for #name {
            fn unpack<R: Read>(mut reader: R) -> Result<Self> {
                #(#smts)*
                Ok(Self #fields)
            }
        }
    };
    output.into()
}
