//! Static name tables.
//!
//! Element and attribute names are closed sets. Each name is a small ordinal
//! (its position in the table) plus a display name and a few classification
//! flags. The tape stores only the ordinal.

/// How an element's content affects line breaks when rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Content {
    /// Starts on its own line; its end tag goes on its own line when it has
    /// children.
    Block,
    /// Inline, never forces a line break.
    Phrasing,
    /// Children are written verbatim, wrapped in newlines.
    RawText,
}

macro_rules! element_names {
    (@void void) => { true };
    (@void) => { false };
    ($($variant:ident = $name:literal: $content:ident $(+ $void:ident)?),* $(,)?) => {
        /// A standard element name.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        #[repr(u8)]
        pub enum ElementName {
            $($variant,)*
        }

        impl ElementName {
            /// Every element name, in ordinal order.
            pub const ALL: &'static [ElementName] = &[$(ElementName::$variant,)*];

            pub const fn name(self) -> &'static str {
                match self {
                    $(ElementName::$variant => $name,)*
                }
            }

            pub const fn content(self) -> Content {
                match self {
                    $(ElementName::$variant => Content::$content,)*
                }
            }

            /// Void elements have no children and no end tag.
            pub const fn is_void(self) -> bool {
                match self {
                    $(ElementName::$variant => element_names!(@void $($void)?),)*
                }
            }
        }
    };
}

element_names! {
    A = "a": Phrasing,
    Abbr = "abbr": Phrasing,
    Article = "article": Block,
    B = "b": Phrasing,
    Blockquote = "blockquote": Block,
    Body = "body": Block,
    Br = "br": Phrasing + void,
    Button = "button": Phrasing,
    ClipPath = "clipPath": Block,
    Code = "code": Phrasing,
    Dd = "dd": Block,
    Defs = "defs": Block,
    Details = "details": Block,
    Div = "div": Block,
    Dl = "dl": Block,
    Dt = "dt": Block,
    Em = "em": Phrasing,
    Fieldset = "fieldset": Block,
    Figure = "figure": Block,
    Footer = "footer": Block,
    Form = "form": Block,
    G = "g": Block,
    H1 = "h1": Block,
    H2 = "h2": Block,
    H3 = "h3": Block,
    H4 = "h4": Block,
    H5 = "h5": Block,
    H6 = "h6": Block,
    Head = "head": Block,
    Header = "header": Block,
    Hgroup = "hgroup": Block,
    Hr = "hr": Block + void,
    Html = "html": Block,
    Img = "img": Phrasing + void,
    Input = "input": Phrasing + void,
    Kbd = "kbd": Phrasing,
    Label = "label": Phrasing,
    Legend = "legend": Block,
    Li = "li": Block,
    Link = "link": Block + void,
    Main = "main": Block,
    Menu = "menu": Block,
    Meta = "meta": Block + void,
    Nav = "nav": Block,
    Ol = "ol": Block,
    Optgroup = "optgroup": Block,
    Option = "option": Block,
    P = "p": Block,
    Path = "path": Block,
    Pre = "pre": Block,
    Progress = "progress": Phrasing,
    Samp = "samp": Phrasing,
    Script = "script": RawText,
    Section = "section": Block,
    Select = "select": Phrasing,
    Small = "small": Phrasing,
    Span = "span": Phrasing,
    Strong = "strong": Phrasing,
    Style = "style": RawText,
    Sub = "sub": Phrasing,
    Summary = "summary": Block,
    Sup = "sup": Phrasing,
    Svg = "svg": Phrasing,
    Table = "table": Block,
    Tbody = "tbody": Block,
    Td = "td": Block,
    Template = "template": Phrasing,
    Textarea = "textarea": Phrasing,
    Th = "th": Block,
    Thead = "thead": Block,
    Title = "title": Block,
    Tr = "tr": Block,
    Ul = "ul": Block,
}

macro_rules! attribute_names {
    (@boolean boolean) => { true };
    (@boolean $other:ident) => { false };
    (@boolean) => { false };
    (@single single_quoted) => { true };
    (@single $other:ident) => { false };
    (@single) => { false };
    ($($variant:ident = $name:literal $(: $kind:ident)?),* $(,)?) => {
        /// A standard attribute name.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        #[repr(u8)]
        pub enum AttributeName {
            $($variant,)*
        }

        impl AttributeName {
            /// Every attribute name, in ordinal order.
            pub const ALL: &'static [AttributeName] = &[$(AttributeName::$variant,)*];

            pub const fn name(self) -> &'static str {
                match self {
                    $(AttributeName::$variant => $name,)*
                }
            }

            /// Boolean attributes carry no value and render as the bare name.
            pub const fn is_boolean(self) -> bool {
                match self {
                    $(AttributeName::$variant => attribute_names!(@boolean $($kind)?),)*
                }
            }

            /// Values of these attributes are wrapped in `'` instead of `"`.
            pub const fn is_single_quoted(self) -> bool {
                match self {
                    $(AttributeName::$variant => attribute_names!(@single $($kind)?),)*
                }
            }
        }
    };
}

attribute_names! {
    Accesskey = "accesskey",
    Action = "action",
    Align = "align",
    AlignmentBaseline = "alignment-baseline",
    Alt = "alt",
    AriaHidden = "aria-hidden",
    AriaLabel = "aria-label",
    As = "as",
    Async = "async": boolean,
    Autocomplete = "autocomplete",
    Autofocus = "autofocus": boolean,
    BaselineShift = "baseline-shift",
    Border = "border",
    Cellpadding = "cellpadding",
    Cellspacing = "cellspacing",
    Charset = "charset",
    Checked = "checked": boolean,
    Cite = "cite",
    Class = "class",
    ClipPath = "clip-path",
    ClipRule = "clip-rule",
    Closedby = "closedby",
    Color = "color",
    ColorInterpolation = "color-interpolation",
    ColorInterpolationFilters = "color-interpolation-filters",
    Cols = "cols",
    Content = "content",
    Contenteditable = "contenteditable",
    Crossorigin = "crossorigin",
    Cursor = "cursor",
    D = "d",
    DataExecuteDefault = "data-execute-default": boolean,
    DataFrame = "data-frame",
    DataOnClick = "data-on-click": single_quoted,
    DataOnInput = "data-on-input": single_quoted,
    Defer = "defer": boolean,
    Dir = "dir",
    Direction = "direction",
    Dirname = "dirname",
    Disabled = "disabled": boolean,
    Display = "display",
    DominantBaseline = "dominant-baseline",
    Draggable = "draggable",
    Enctype = "enctype",
    Fill = "fill",
    FillOpacity = "fill-opacity",
    FillRule = "fill-rule",
    Filter = "filter",
    FloodColor = "flood-color",
    FloodOpacity = "flood-opacity",
    FontFamily = "font-family",
    FontSize = "font-size",
    FontSizeAdjust = "font-size-adjust",
    FontStretch = "font-stretch",
    FontStyle = "font-style",
    FontVariant = "font-variant",
    FontWeight = "font-weight",
    For = "for",
    Form = "form",
    GlyphOrientationHorizontal = "glyph-orientation-horizontal",
    GlyphOrientationVertical = "glyph-orientation-vertical",
    Height = "height",
    Hidden = "hidden": boolean,
    Href = "href",
    HttpEquiv = "http-equiv",
    Id = "id",
    ImageRendering = "image-rendering",
    Integrity = "integrity",
    Label = "label",
    Lang = "lang",
    LetterSpacing = "letter-spacing",
    LightingColor = "lighting-color",
    MarkerEnd = "marker-end",
    MarkerMid = "marker-mid",
    MarkerStart = "marker-start",
    Mask = "mask",
    MaskType = "mask-type",
    Maxlength = "maxlength",
    Media = "media",
    Method = "method",
    Minlength = "minlength",
    Multiple = "multiple": boolean,
    Name = "name",
    Nomodule = "nomodule": boolean,
    Onafterprint = "onafterprint",
    Onbeforeprint = "onbeforeprint",
    Onbeforeunload = "onbeforeunload",
    Onclick = "onclick",
    Onhashchange = "onhashchange",
    Onlanguagechange = "onlanguagechange",
    Onmessage = "onmessage",
    Onoffline = "onoffline",
    Ononline = "ononline",
    Onpagehide = "onpagehide",
    Onpageshow = "onpageshow",
    Onpopstate = "onpopstate",
    Onrejectionhandled = "onrejectionhandled",
    Onstorage = "onstorage",
    Onsubmit = "onsubmit",
    Onunhandledrejection = "onunhandledrejection",
    Onunload = "onunload",
    Opacity = "opacity",
    Open = "open": boolean,
    Overflow = "overflow",
    PaintOrder = "paint-order",
    Placeholder = "placeholder",
    PointerEvents = "pointer-events",
    Property = "property",
    Readonly = "readonly": boolean,
    Referrerpolicy = "referrerpolicy",
    Rel = "rel",
    Required = "required": boolean,
    Rev = "rev",
    Reversed = "reversed": boolean,
    Role = "role",
    Rows = "rows",
    Selected = "selected": boolean,
    ShapeRendering = "shape-rendering",
    Size = "size",
    Sizes = "sizes",
    Spellcheck = "spellcheck",
    Src = "src",
    Srcset = "srcset",
    Start = "start",
    StopColor = "stop-color",
    StopOpacity = "stop-opacity",
    Stroke = "stroke",
    StrokeDasharray = "stroke-dasharray",
    StrokeDashoffset = "stroke-dashoffset",
    StrokeLinecap = "stroke-linecap",
    StrokeLinejoin = "stroke-linejoin",
    StrokeMiterlimit = "stroke-miterlimit",
    StrokeOpacity = "stroke-opacity",
    StrokeWidth = "stroke-width",
    Style = "style",
    Tabindex = "tabindex",
    Target = "target",
    TextAnchor = "text-anchor",
    TextDecoration = "text-decoration",
    TextOverflow = "text-overflow",
    TextRendering = "text-rendering",
    Title = "title",
    Transform = "transform",
    TransformOrigin = "transform-origin",
    Translate = "translate",
    Type = "type",
    UnicodeBidi = "unicode-bidi",
    Value = "value",
    VectorEffect = "vector-effect",
    ViewBox = "viewBox",
    Visibility = "visibility",
    WhiteSpace = "white-space",
    Width = "width",
    WordSpacing = "word-spacing",
    Wrap = "wrap",
    WritingMode = "writing-mode",
    Xmlns = "xmlns",
}

/// A name that is either an attribute of its parent or a child element,
/// depending on which element encloses it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Ambiguous {
    ClipPath,
    Form,
    Label,
    Title,
}

impl Ambiguous {
    pub const ALL: &'static [Ambiguous] = &[
        Ambiguous::ClipPath,
        Ambiguous::Form,
        Ambiguous::Label,
        Ambiguous::Title,
    ];

    /// The name used when this resolves to an attribute.
    pub const fn attribute(self) -> AttributeName {
        match self {
            Ambiguous::ClipPath => AttributeName::ClipPath,
            Ambiguous::Form => AttributeName::Form,
            Ambiguous::Label => AttributeName::Label,
            Ambiguous::Title => AttributeName::Title,
        }
    }

    /// The name used when this resolves to a child element.
    pub const fn element(self) -> ElementName {
        match self {
            Ambiguous::ClipPath => ElementName::ClipPath,
            Ambiguous::Form => ElementName::Form,
            Ambiguous::Label => ElementName::Label,
            Ambiguous::Title => ElementName::Title,
        }
    }

    pub fn is_attribute_of(self, parent: ElementName) -> bool {
        match self {
            Ambiguous::ClipPath => parent != ElementName::Svg,
            Ambiguous::Form => matches!(parent, ElementName::Select | ElementName::Textarea),
            Ambiguous::Label => parent == ElementName::Option,
            Ambiguous::Title => !matches!(parent, ElementName::Head | ElementName::Svg),
        }
    }
}

macro_rules! ordinals {
    ($($ty:ident),*) => {
        $(
            impl $ty {
                /// The ordinal stored on the tape.
                #[inline]
                pub const fn index(self) -> u8 {
                    self as u8
                }

                pub fn from_index(index: u8) -> Option<Self> {
                    Self::ALL.get(index as usize).copied()
                }
            }
        )*
    };
}

ordinals!(ElementName, AttributeName, Ambiguous);

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use facet_testhelpers::test;

    #[test]
    fn test_ordinals_match_table_order() {
        for (index, name) in ElementName::ALL.iter().enumerate() {
            assert_eq!(name.index() as usize, index);
            assert_eq!(ElementName::from_index(index as u8), Some(*name));
        }
        for (index, name) in AttributeName::ALL.iter().enumerate() {
            assert_eq!(name.index() as usize, index);
            assert_eq!(AttributeName::from_index(index as u8), Some(*name));
        }
        assert_eq!(ElementName::from_index(u8::MAX), None);
    }

    #[test]
    fn test_flags() {
        assert!(ElementName::Br.is_void());
        assert!(!ElementName::Div.is_void());
        assert_eq!(ElementName::Style.content(), Content::RawText);
        assert_eq!(ElementName::Strong.content(), Content::Phrasing);
        assert_eq!(ElementName::ClipPath.name(), "clipPath");

        assert!(AttributeName::Disabled.is_boolean());
        assert!(AttributeName::Checked.is_boolean());
        assert_eq!(AttributeName::FontSizeAdjust.name(), "font-size-adjust");
        assert!(!AttributeName::Href.is_boolean());
        assert!(AttributeName::DataOnClick.is_single_quoted());
        assert_eq!(AttributeName::HttpEquiv.name(), "http-equiv");
        assert_eq!(AttributeName::ViewBox.name(), "viewBox");
    }

    #[test]
    fn test_ambiguous_resolution() {
        assert!(Ambiguous::Title.is_attribute_of(ElementName::Div));
        assert!(!Ambiguous::Title.is_attribute_of(ElementName::Head));
        assert!(!Ambiguous::ClipPath.is_attribute_of(ElementName::Svg));
        assert!(Ambiguous::Form.is_attribute_of(ElementName::Select));
        assert!(!Ambiguous::Form.is_attribute_of(ElementName::Body));
        assert!(Ambiguous::Label.is_attribute_of(ElementName::Option));
        assert_eq!(Ambiguous::Label.element(), ElementName::Label);
        assert_eq!(Ambiguous::ClipPath.attribute(), AttributeName::ClipPath);
    }
}
