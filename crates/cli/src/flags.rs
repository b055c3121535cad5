use clap::ValueEnum;
use dex_graph::Layout;

#[derive(Copy, Clone, ValueEnum)]
pub(crate) enum LayoutFlag {
    Linear,
    Branching,
    Complex,
}

impl LayoutFlag {
    pub(crate) const fn as_domain(self) -> Layout {
        match self {
            LayoutFlag::Linear => Layout::Linear,
            LayoutFlag::Branching => Layout::Branching,
            LayoutFlag::Complex => Layout::Complex,
        }
    }
}
