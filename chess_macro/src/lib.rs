extern crate proc_macro;
use proc_macro::{TokenStream, TokenTree};

struct EnumSpec {
    name: &'static str,
    variants: Vec<String>,
    labels: Vec<String>,
}

#[proc_macro]
pub fn make_ranks_files_squares(_: TokenStream) -> TokenStream {
    let rank_variants = [
        "First", "Second", "Third", "Fourth", "Fifth", "Sixth", "Seventh", "Eighth",
    ];
    let file_labels = ["a", "b", "c", "d", "e", "f", "g", "h"];

    let ranks = EnumSpec {
        name: "Rank",
        variants: rank_variants.iter().map(|v| v.to_string()).collect(),
        labels: (1..=8).map(|r| r.to_string()).collect(),
    };

    let files = EnumSpec {
        name: "File",
        variants: file_labels.iter().map(|f| f.to_uppercase()).collect(),
        labels: file_labels.iter().map(|f| f.to_string()).collect(),
    };

    // Square index is rank * 8 + file, so A1 = 0 and H8 = 63
    let squares = EnumSpec {
        name: "Square",
        variants: (1..=8)
            .flat_map(|r| file_labels.iter().map(move |f| format!("{}{r}", f.to_uppercase())))
            .collect(),
        labels: (1..=8)
            .flat_map(|r| file_labels.iter().map(move |f| format!("{f}{r}")))
            .collect(),
    };

    let output = [ranks, files, squares]
        .iter()
        .map(create_enum_and_impl)
        .collect::<Vec<String>>()
        .join("\n");
    output.parse().expect("Output code is valid")
}

fn create_enum_and_impl(spec: &EnumSpec) -> String {
    let name = spec.name;
    let count = spec.variants.len();

    let variants = spec.variants.join(",");
    let all = spec
        .variants
        .iter()
        .map(|v| format!("Self::{v}"))
        .collect::<Vec<String>>()
        .join(",");
    let from_arms = spec
        .variants
        .iter()
        .enumerate()
        .fold(String::new(), |mut acc, (i, v)| {
            acc += &format!("{i} => Some(Self::{v}),");
            acc
        });
    let label_arms = spec
        .variants
        .iter()
        .zip(&spec.labels)
        .fold(String::new(), |mut acc, (v, l)| {
            acc += &format!("Self::{v} => \"{l}\",");
            acc
        });

    format!(
        "
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u8)]
        pub enum {name} {{ {variants} }}

        impl {name} {{
            pub const COUNT: usize = {count};
            pub const ALL: [Self; {count}] = [{all}];
            pub const fn from_u8_checked(input: u8) -> Option<Self> {{
                match input {{
                    {from_arms}
                    _ => None
                }}
            }}
            pub const fn from_u8(input: u8) -> Self {{
                match Self::from_u8_checked(input) {{
                    Some(v) => v,
                    None => panic!(\"{name} index out of range\"),
                }}
            }}
            pub const fn increment_checked(&self, delta: i8) -> Option<Self> {{
                Self::from_u8_checked((*self as i8).wrapping_add(delta) as u8)
            }}
            pub const fn increment(&self, delta: i8) -> Self {{
                Self::from_u8((*self as i8).wrapping_add(delta) as u8)
            }}
            pub const fn idx(&self) -> usize {{
                *self as usize
            }}
            pub const fn label(&self) -> &'static str {{
                match self {{
                    {label_arms}
                }}
            }}
        }}

        impl std::fmt::Display for {name} {{
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {{
                f.write_str(self.label())
            }}
        }}
    "
    )
}

/// Builds a `Bitboard` literal from an 8x8 picture, rank 8 first.
/// `X` marks a set square and `.` an empty one.
#[proc_macro]
pub fn make_bitboard(tokens: TokenStream) -> TokenStream {
    let mut bb: u64 = 0;
    let mut cells = Vec::with_capacity(64);

    for t in tokens {
        match t {
            TokenTree::Ident(i) if i.to_string() == "X" => cells.push(true),
            TokenTree::Punct(p) if p.as_char() == '.' => cells.push(false),
            other => return compile_error(&format!("unexpected token '{other}' in make_bitboard!")),
        }
    }

    if cells.len() != 64 {
        return compile_error(&format!(
            "make_bitboard! needs 64 cells, got {}",
            cells.len()
        ));
    }

    for (i, set) in cells.into_iter().enumerate() {
        let rank = 7 - i / 8;
        let file = i % 8;
        if set {
            bb |= 1 << (rank * 8 + file);
        }
    }

    format!("Bitboard({bb:#x})")
        .parse()
        .expect("Output of make_bitboard! should be valid")
}

fn compile_error(msg: &str) -> TokenStream {
    format!("compile_error!({msg:?})")
        .parse()
        .expect("compile_error! invocation is valid")
}
