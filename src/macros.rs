// src/macros.rs
#[macro_export]
macro_rules! s {
    // String shorthand!
    () => {
        ::std::string::String::new()
    };
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

#[macro_export]
macro_rules! join {
    // Concatenate string-likes into a fresh String.
    ($first:expr $(, $rest:expr)+ $(,)?) => {{
        let mut s = ::std::string::String::from($first);
        $(
            s.push_str($rest);
        )+
        s
    }};
}

#[macro_export]
macro_rules! cols {
    // Owned header/row cells: cols!["a", b, &c] -> Vec<String>
    ($($cell:expr),* $(,)?) => {
        vec![$(::std::string::String::from($cell)),*]
    };
}
