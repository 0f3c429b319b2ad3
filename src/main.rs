use clap::{Args, Parser, Subcommand};
use print_perfect::catalog::{self, Category};
use print_perfect::cms::{ContentSource, JsonFileSource, WordPressSource};
use print_perfect::generate::{self, Site};
use print_perfect::pricing::{
    BusinessCardOrder, CardCorners, CardFinish, CardSides, FormulaPricing, PriceQuote,
    PricingError, PricingStrategy, ProductLine, RawBookOrder, TablePricing, ValidationErrors,
};
use print_perfect::{config, faq, output};
use serde::Serialize;
use std::path::PathBuf;

fn version_string() -> &'static str {
    if env!("ON_RELEASE_TAG") == "true" {
        return env!("CARGO_PKG_VERSION");
    }
    match env!("GIT_HASH") {
        "" => "dev@unknown",
        // Built once per process
        hash => Box::leak(format!("dev@{hash}").into_boxed_str()),
    }
}

#[derive(Parser)]
#[command(name = "print-perfect")]
#[command(about = "Storefront builder and price calculator for Print Perfect")]
#[command(long_about = "\
Storefront builder and price calculator for Print Perfect

Builds the static storefront (catalog, book calculator, business cards, FAQ)
and prices orders from the command line with the same engine the site uses.

Pricing:
  Books           formula: binding + cover base, per-page cost scaled by
                  paper weight and trim size, 5% off above 100 copies
  Business cards  table: fixed prices for 50, 100, 200, 400, 600, 800, 1000

FAQ content is read from WordPress posts (see [faq] in config.toml) or from
a JSON file with --faq-json. A failed fetch fails the build.

Run 'print-perfect gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Directory holding config.toml
    #[arg(long, default_value = ".", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

/// Where FAQ posts come from.
#[derive(Args, Clone)]
struct FaqArgs {
    /// Read FAQ posts from a JSON file instead of the CMS
    #[arg(long, value_name = "PATH")]
    faq_json: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch FAQ content and render the storefront
    Build {
        #[command(flatten)]
        faq: FaqArgs,
        /// Skip the CMS and render the built-in FAQ questions
        #[arg(long, conflicts_with = "faq_json")]
        no_faq: bool,
    },
    /// Price an order
    #[command(subcommand)]
    Quote(QuoteCommand),
    /// Fetch and print the parsed FAQ entries
    Faq(FaqArgs),
    /// List catalog products
    Catalog {
        /// Only this category (business-cards, postcards, stationery)
        #[arg(long)]
        category: Option<Category>,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

#[derive(Subcommand)]
enum QuoteCommand {
    /// Quote a custom book (formula pricing)
    Book(BookArgs),
    /// Quote business cards (table pricing)
    Cards(CardArgs),
}

/// Book options. Anything omitted keeps the calculator default.
#[derive(Args)]
struct BookArgs {
    /// saddle or perfect
    #[arg(long)]
    binding: Option<String>,
    /// Page count (saddle 4-48, perfect 32-800)
    #[arg(long)]
    pages: Option<u32>,
    /// Trim size, e.g. "6 in x 9 in" or 6x9
    #[arg(long)]
    size: Option<String>,
    /// Copies (5-500)
    #[arg(long)]
    quantity: Option<u32>,
    /// coated or uncoated
    #[arg(long)]
    cover_material: Option<String>,
    /// Cover paper weight code, e.g. 100lb-cover-gloss
    #[arg(long)]
    cover_weight: Option<String>,
    /// matte or gloss
    #[arg(long)]
    cover_finish: Option<String>,
    /// full-color or black-white
    #[arg(long)]
    inside_material: Option<String>,
    /// Interior paper weight code, e.g. 80lb-matte
    #[arg(long)]
    inside_weight: Option<String>,
    /// Print the quote as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct CardArgs {
    /// 50, 100, 200, 400, 600, 800 or 1000
    #[arg(long, default_value_t = 50)]
    quantity: u32,
    /// gloss or matte
    #[arg(long, default_value = "gloss")]
    finish: String,
    /// square or rounded
    #[arg(long, default_value = "square")]
    corners: String,
    /// single or double
    #[arg(long, default_value = "single")]
    sides: String,
    /// Print the quote as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct QuoteReport<'a, O: Serialize> {
    product_line: ProductLine,
    strategy: &'static str,
    order: &'a O,
    quote: PriceQuote,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build { faq, no_faq } => {
            println!("==> Loading config from {}", cli.source.display());
            let site_config = config::load_config(&cli.source)?;

            let source = if no_faq {
                None
            } else {
                Some(faq_source(&faq, &site_config))
            };
            match &source {
                Some(source) => println!("==> Fetching FAQ from {}", source.describe()),
                None => println!("==> Skipping FAQ fetch"),
            }
            let site = Site::resolve(site_config, source.as_deref())?;

            println!("==> Rendering pages → {}", cli.output.display());
            let pages = generate::generate(&site, &cli.output)?;
            output::print_generate_output(&site, &pages);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Quote(QuoteCommand::Book(args)) => {
            let spec = match book_order(&args).parse() {
                Ok(spec) => spec,
                Err(errors) => invalid(&errors),
            };
            let quote = quote_or_exit(FormulaPricing.quote(&spec));
            if args.json {
                print_json(ProductLine::Books, &spec, quote)?;
            } else {
                output::print_book_quote(&spec, &quote);
            }
        }
        Command::Quote(QuoteCommand::Cards(args)) => {
            let order = match card_order(&args) {
                Ok(order) => order,
                Err(errors) => invalid(&errors),
            };
            let quote = match TablePricing.quote(&order) {
                Ok(quote) => quote,
                Err(PricingError::Invalid(errors)) => {
                    output::print_validation_errors(&errors);
                    output::print_card_tiers();
                    std::process::exit(1);
                }
            };
            if args.json {
                print_json(ProductLine::BusinessCards, &order, quote)?;
            } else {
                output::print_card_quote(&order, &quote);
            }
        }
        Command::Faq(args) => {
            let site_config = config::load_config(&cli.source)?;
            let source = faq_source(&args, &site_config);
            println!("==> Fetching FAQ from {}", source.describe());
            let posts = source.fetch_posts()?;
            output::print_faq(&faq::sections_from_posts(&posts));
        }
        Command::Catalog { category } => {
            let products = match category {
                Some(category) => catalog::by_category(category),
                None => catalog::products(),
            };
            output::print_catalog(&products);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// The JSON file when one is given, otherwise the configured CMS.
fn faq_source(args: &FaqArgs, site_config: &config::SiteConfig) -> Box<dyn ContentSource> {
    match &args.faq_json {
        Some(path) => Box::new(JsonFileSource::new(path)),
        None => Box::new(WordPressSource::from_config(&site_config.faq)),
    }
}

/// Calculator defaults with the given flags applied.
fn book_order(args: &BookArgs) -> RawBookOrder {
    let mut raw = RawBookOrder::default();
    let overrides = [
        (&args.binding, &mut raw.binding_type),
        (&args.size, &mut raw.size),
        (&args.cover_material, &mut raw.cover_material),
        (&args.cover_weight, &mut raw.cover_paper_weight),
        (&args.cover_finish, &mut raw.cover_finish),
        (&args.inside_material, &mut raw.inside_material),
        (&args.inside_weight, &mut raw.inside_paper_weight),
    ];
    for (flag, field) in overrides {
        if let Some(value) = flag {
            *field = value.clone();
        }
    }
    if let Some(pages) = args.pages {
        raw.page_count = pages;
    }
    if let Some(quantity) = args.quantity {
        raw.quantity = quantity;
    }
    raw
}

/// Parse the card options, collecting every bad value.
fn card_order(args: &CardArgs) -> Result<BusinessCardOrder, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let finish = args.finish.parse::<CardFinish>().map_err(|e| errors.push(e)).ok();
    let corners = args.corners.parse::<CardCorners>().map_err(|e| errors.push(e)).ok();
    let sides = args.sides.parse::<CardSides>().map_err(|e| errors.push(e)).ok();
    match (finish, corners, sides) {
        (Some(finish), Some(corners), Some(sides)) => Ok(BusinessCardOrder {
            finish,
            corners,
            sides,
            quantity: args.quantity,
        }),
        _ => Err(errors),
    }
}

fn quote_or_exit(result: Result<PriceQuote, PricingError>) -> PriceQuote {
    match result {
        Ok(quote) => quote,
        Err(PricingError::Invalid(errors)) => invalid(&errors),
    }
}

/// Report rejected fields and exit non-zero.
fn invalid(errors: &ValidationErrors) -> ! {
    output::print_validation_errors(errors);
    std::process::exit(1);
}

fn print_json<O: Serialize>(
    product_line: ProductLine,
    order: &O,
    quote: PriceQuote,
) -> Result<(), serde_json::Error> {
    let report = QuoteReport {
        product_line,
        strategy: product_line.strategy_name(),
        order,
        quote,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
