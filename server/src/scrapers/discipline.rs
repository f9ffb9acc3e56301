//! Discipline scraper plugin (spec §4.6/§4.7): pulls the full discipline
//! catalog from a single HTML page and decodes it into [`Discipline`]
//! records.
//!
//! Page shape this plugin expects (the spec leaves the concrete layout
//! unspecified — §1 "Out of scope"): one `<article class="disciplina">`
//! per discipline, `data-codigo`/`data-creditos` attributes, a nested
//! `<h2 class="nome">` for the display name, and a `<ul class="requisito-de">`
//! of `<li>` discipline codes that require this one.
//!
//! ```html
//! <article class="disciplina" data-codigo="MC102" data-creditos="6">
//!   <h2 class="nome">Algoritmos e Programacao de Computadores</h2>
//!   <ul class="requisito-de"><li>MC202</li><li>MC322</li></ul>
//! </article>
//! ```

use async_trait::async_trait;
use campus_search_scrape::html::get_text;
use campus_search_scrape::{ScrapeEnv, ScrapingError, Scraper};
use scraper::{ElementRef, Html, Selector};

use crate::domain::Discipline;

pub struct DisciplineScraper {
    pub base_url: String,
}

fn parse_article(article: ElementRef<'_>) -> Result<Discipline, campus_search_scrape::ParsingError> {
    let code = article
        .value()
        .attr("data-codigo")
        .ok_or(campus_search_scrape::ParsingError::MissingElement)?
        .to_string();

    let credits: u32 = article
        .value()
        .attr("data-creditos")
        .and_then(|c| c.parse().ok())
        .ok_or_else(|| campus_search_scrape::ParsingError::UnparseableText("u32".to_string()))?;

    let name_selector = Selector::parse("h2.nome").expect("static selector");
    let name = get_text(article.select(&name_selector).next(), Some("h2"), false)?;

    let req_by_selector = Selector::parse("ul.requisito-de > li").expect("static selector");
    let req_by = article
        .select(&req_by_selector)
        .map(|li| get_text(Some(li), Some("li"), false))
        .collect::<Result<_, _>>()?;

    Ok(Discipline { code, name, credits, req_by })
}

#[async_trait]
impl Scraper for DisciplineScraper {
    type Output = Vec<Discipline>;

    fn cache_key(&self) -> &str {
        "discipline"
    }

    async fn scrape(&self, env: &ScrapeEnv) -> Result<Self::Output, ScrapingError> {
        let document: Html = env.fetch_html(&format!("{}/disciplinas", self.base_url)).await?;
        let article_selector = Selector::parse("article.disciplina").expect("static selector");

        document
            .select(&article_selector)
            .map(|article| parse_article(article).map_err(ScrapingError::from))
            .collect()
    }
}
