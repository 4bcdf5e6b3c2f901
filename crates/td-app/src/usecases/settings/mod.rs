mod theme;

pub use theme::ToggleTheme;
