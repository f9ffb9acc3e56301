//! Course scraper plugin (spec §4.6/§4.7): pulls the course catalog from a
//! single HTML page and decodes it into [`Course`] records, each with one
//! or more curriculum variants.
//!
//! Page shape this plugin expects (spec §1 leaves the concrete layout
//! unspecified): one `<h2>Curso NNG</h2>` header per course — the
//! `^Curso ([0-9]+)G$` pattern named as an example in spec §4.7 — followed
//! by a sibling `<div class="variantes">` whose `.variante` children each
//! carry a `data-codigo` (`AA`/`AB`/`AX`) and a sequence of `.semestre`
//! blocks listing `.disciplina` spans (`data-creditos` attribute) and an
//! optional `.eletivas` elective-slot count.
//!
//! ```html
//! <h2>Curso 34G</h2>
//! <div class="variantes">
//!   <div class="variante" data-codigo="AX">
//!     <div class="semestre">
//!       <span class="disciplina" data-creditos="4">F 128</span>
//!       <span class="eletivas">0</span>
//!     </div>
//!   </div>
//! </div>
//! ```

use async_trait::async_trait;
use campus_search_scrape::html::{get_text, parse_sections};
use campus_search_scrape::{ScrapeEnv, ScrapingError, Scraper};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::OnceLock;

use crate::domain::{Course, CourseVariant, DisciplineRef, Semester};

pub struct CourseScraper {
    pub base_url: String,
}

fn course_header_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^Curso ([0-9]+)G$").expect("static regex"))
}

fn parse_discipline_ref(span: ElementRef<'_>) -> Result<DisciplineRef, campus_search_scrape::ParsingError> {
    let credits: u32 = span
        .value()
        .attr("data-creditos")
        .and_then(|c| c.parse().ok())
        .ok_or_else(|| campus_search_scrape::ParsingError::UnparseableText("u32".to_string()))?;
    let code = get_text(Some(span), Some("span"), false)?;
    Ok(DisciplineRef { code, credits })
}

fn parse_semester(block: ElementRef<'_>) -> Result<Semester, campus_search_scrape::ParsingError> {
    let discipline_selector = Selector::parse("span.disciplina").expect("static selector");
    let disciplines = block
        .select(&discipline_selector)
        .map(parse_discipline_ref)
        .collect::<Result<Vec<_>, _>>()?;

    let electives_selector = Selector::parse("span.eletivas").expect("static selector");
    let electives = match block.select(&electives_selector).next() {
        Some(node) => get_text(Some(node), Some("span"), false)?
            .parse()
            .map_err(|_| campus_search_scrape::ParsingError::UnparseableText("u32".to_string()))?,
        None => 0,
    };

    Ok(Semester { disciplines, electives })
}

fn parse_variant(variant_div: ElementRef<'_>) -> Result<CourseVariant, campus_search_scrape::ParsingError> {
    let code = variant_div
        .value()
        .attr("data-codigo")
        .ok_or(campus_search_scrape::ParsingError::MissingElement)?
        .to_string();

    let semester_selector = Selector::parse("div.semestre").expect("static selector");
    let semesters =
        variant_div.select(&semester_selector).map(parse_semester).collect::<Result<Vec<_>, _>>()?;

    Ok(CourseVariant { code, semesters })
}

fn parse_course(header_text: &str, body: ElementRef<'_>) -> Result<Course, campus_search_scrape::ParsingError> {
    let captures = course_header_re()
        .captures(header_text)
        .ok_or_else(|| campus_search_scrape::ParsingError::UnparseableText("course code".to_string()))?;
    let code = captures[1].to_string();

    let variant_selector = Selector::parse("div.variante").expect("static selector");
    let variants =
        body.select(&variant_selector).map(parse_variant).collect::<Result<Vec<_>, _>>()?;

    Ok(Course { code: code.clone(), name: format!("Curso {code}"), variants })
}

#[async_trait]
impl Scraper for CourseScraper {
    type Output = Vec<Course>;

    fn cache_key(&self) -> &str {
        "course"
    }

    async fn scrape(&self, env: &ScrapeEnv) -> Result<Self::Output, ScrapingError> {
        let document = env.fetch_html(&format!("{}/cursos", self.base_url)).await?;
        let container_selector = Selector::parse("#cursos").expect("static selector");
        let container = document
            .select(&container_selector)
            .next()
            .ok_or(campus_search_scrape::ParsingError::MissingElement)?;

        let sections = parse_sections(container, "h2", |header| {
            header.next_sibling_element().filter(|e| e.value().attr("class") == Some("variantes"))
        })?;

        sections
            .into_iter()
            .map(|(header, body)| parse_course(&header, body).map_err(ScrapingError::from))
            .collect()
    }
}
