use compute::slices::cases_in_range;
use formats::CaseStatus;
use foundation::ids::ViewId;
use scene::node::{HtmlNode, Scene};

use crate::layer::{RenderContext, ViewRenderer};

/// One dot per case in the selected range, in file order.
pub struct BeeswarmView;

const DOT_CLASS: &str =
    "w-2 h-2 rounded-full inline-block m-0.5 transition-transform hover:scale-150 cursor-help";

impl ViewRenderer for BeeswarmView {
    fn view(&self) -> ViewId {
        ViewId::Beeswarm
    }

    fn render(&self, ctx: &RenderContext<'_>) -> Scene {
        let cases = cases_in_range(ctx.datasets, ctx.selection.range);
        if cases.is_empty() {
            return Scene::Placeholder;
        }
        let dots = cases
            .into_iter()
            .map(|c| {
                let color = match c.case_status {
                    CaseStatus::Killed => "bg-stamp",
                    CaseStatus::Imprisoned => "bg-ink",
                };
                HtmlNode::element("div", format!("{DOT_CLASS} {color}"), vec![]).with_title(
                    format!(
                        "{} | {} | {}",
                        ctx.display_name(&c.country),
                        c.year,
                        c.role_or_default()
                    ),
                )
            })
            .collect();
        Scene::Html(dots)
    }
}

#[cfg(test)]
mod tests {
    use super::BeeswarmView;
    use crate::fixtures;
    use crate::layer::{RenderContext, RenderOptions, ViewRenderer};
    use catalog::CountryNames;
    use foundation::bounds::Size;
    use foundation::time::YearRange;
    use scene::node::{HtmlNode, Scene};
    use scene::selection::SelectionState;

    fn render(range: YearRange) -> Scene {
        let ds = fixtures::datasets();
        let names = CountryNames::default();
        let mut sel = SelectionState::default();
        sel.range = range;
        let ctx = RenderContext {
            datasets: &ds,
            names: &names,
            selection: &sel,
            size: Size::new(480.0, 420.0),
            options: RenderOptions::default(),
        };
        BeeswarmView.render(&ctx)
    }

    #[test]
    fn dots_carry_status_class_and_tooltip() {
        let Scene::Html(dots) = render(YearRange::normalized(2011, 2015)) else {
            panic!("beeswarm is html");
        };
        let summary: Vec<(bool, Option<String>)> = dots
            .iter()
            .map(|d| match d {
                HtmlNode::Element { class, title, .. } => (
                    class.as_deref().is_some_and(|c| c.ends_with("bg-stamp")),
                    title.clone(),
                ),
                _ => (false, None),
            })
            .collect();
        assert_eq!(
            summary,
            vec![
                (
                    true,
                    Some("Syrian Arab Republic | 2012 | Camera Operator".to_string())
                ),
                (false, Some("Mexico | 2013 | Journalist".to_string())),
            ]
        );
    }

    #[test]
    fn empty_range_shows_placeholder() {
        assert!(render(YearRange::single(2030)).is_placeholder());
    }
}
