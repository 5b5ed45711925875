//! Landing page route handler.
//!
//! Renders the marketing sections (hero, benefits, how-it-works,
//! testimonials, FAQ) and the waitlist signup form. The waitlist submit
//! handler re-renders this page with errors or the submitted state.

use askama::Template;
use askama_web::WebTemplate;
use tower_sessions::Session;

use steer_core::SignupRole;

use crate::error::AppError;
use crate::filters;
use crate::forms::{FieldErrors, WaitlistForm};
use crate::middleware::OptionalAuth;
use crate::models::session_keys;
use crate::routes::issue_form_token;

// =============================================================================
// Static marketing content
// =============================================================================

/// A frequently asked question.
#[derive(Clone)]
pub struct Faq {
    pub question: &'static str,
    pub answer: &'static str,
}

/// A benefit card.
#[derive(Clone)]
pub struct Benefit {
    pub title: &'static str,
    pub description: &'static str,
}

/// A numbered how-it-works step.
#[derive(Clone)]
pub struct HowItWorksStep {
    pub number: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

/// A featured product card.
#[derive(Clone)]
pub struct FeaturedProduct {
    pub name: &'static str,
    pub price: &'static str,
    pub weight: &'static str,
    pub image_url: &'static str,
    pub farm: &'static str,
    pub description: &'static str,
}

/// A customer or farmer testimonial.
#[derive(Clone)]
pub struct Testimonial {
    pub quote: &'static str,
    pub author: &'static str,
    pub title: &'static str,
}

/// Benefit cards for the "Why Choose Steer?" section.
#[must_use]
pub fn benefits() -> Vec<Benefit> {
    vec![
        Benefit {
            title: "Premium Quality",
            description: "Ethically raised, grass-fed beef from local farms with complete transparency in farming practices.",
        },
        Benefit {
            title: "Direct Relationships",
            description: "Connect directly with farmers, cutting out middlemen and supporting local agriculture.",
        },
        Benefit {
            title: "Farm to Table",
            description: "Fresh cuts delivered straight to your door, with complete traceability from farm to table.",
        },
    ]
}

/// Steps for the "How Steer Works" section.
#[must_use]
pub fn how_it_works() -> Vec<HowItWorksStep> {
    vec![
        HowItWorksStep {
            number: "01",
            title: "Join the Waitlist",
            description: "Sign up to be notified when Steer launches in your area.",
        },
        HowItWorksStep {
            number: "02",
            title: "Browse Local Farms",
            description: "Explore profiles of local cattle farmers and their farming practices.",
        },
        HowItWorksStep {
            number: "03",
            title: "Select Your Cuts",
            description: "Choose from a variety of premium beef cuts or select bulk packages.",
        },
        HowItWorksStep {
            number: "04",
            title: "Farm Fresh Delivery",
            description: "Receive your order directly from the farm to your doorstep.",
        },
    ]
}

/// Testimonials for the "What People Are Saying" section.
#[must_use]
pub fn testimonials() -> Vec<Testimonial> {
    vec![
        Testimonial {
            quote: "Connecting directly with farmers has completely changed how I buy beef. The quality is incomparable and I love supporting local agriculture.",
            author: "Sarah Johnson",
            title: "Home Chef",
        },
        Testimonial {
            quote: "As a farmer, Steer has helped me reach customers directly and earn more for my products while building meaningful relationships.",
            author: "Mike Peterson",
            title: "Cattle Farmer",
        },
        Testimonial {
            quote: "The transparency and quality assurance from farm to table gives me confidence in what I'm serving my family.",
            author: "David Chen",
            title: "Busy Parent",
        },
    ]
}

/// Entries for the FAQ accordion.
#[must_use]
pub fn faqs() -> Vec<Faq> {
    vec![
        Faq {
            question: "How does Steer work?",
            answer: "Steer is a platform that connects consumers directly with local cattle farmers. You can browse farms, select the cuts or packages you want, and have them delivered directly to your door. Currently, we're building our network and accepting waitlist signups.",
        },
        Faq {
            question: "Where is Steer available?",
            answer: "We're currently planning our initial launch in select regions. Join our waitlist to be notified when we launch in your area.",
        },
        Faq {
            question: "How is the beef processed and packaged?",
            answer: "All beef is processed at USDA-inspected facilities and professionally packaged for freshness. Each package is labeled with farm origin, cut information, and processing date for complete transparency.",
        },
        Faq {
            question: "Do you offer bulk purchases?",
            answer: "Yes, you'll be able to purchase quarter, half, or whole animals directly from farmers, often at a significant discount compared to individual cuts.",
        },
        Faq {
            question: "How do you ensure quality?",
            answer: "We carefully vet all partner farms for their raising practices, animal welfare standards, and quality of product. We also collect and share customer reviews for each farm.",
        },
    ]
}

/// Featured product cards, shared with the member dashboard.
#[must_use]
pub fn featured_products() -> Vec<FeaturedProduct> {
    vec![
        FeaturedProduct {
            name: "Premium Ribeye Steak",
            price: "$24.99",
            weight: "12oz",
            image_url: "https://images.unsplash.com/photo-1603048297172-c92544817d14?auto=format&fit=crop&q=80",
            farm: "Green Pastures Farm",
            description: "Beautifully marbled grass-fed ribeye, perfect for grilling",
        },
        FeaturedProduct {
            name: "Ground Beef Bundle",
            price: "$39.99",
            weight: "5lb",
            image_url: "https://images.unsplash.com/photo-1551135570-7631a61d31aa?auto=format&fit=crop&q=80",
            farm: "Rocky Mountain Ranch",
            description: "Lean ground beef, perfect for burgers and everyday cooking",
        },
        FeaturedProduct {
            name: "Filet Mignon",
            price: "$29.99",
            weight: "8oz",
            image_url: "https://images.unsplash.com/photo-1600891964092-4316c288032e?auto=format&fit=crop&q=80",
            farm: "Heritage Cattle Co.",
            description: "Tender, melt-in-your-mouth filet from pasture-raised cattle",
        },
        FeaturedProduct {
            name: "Beef Brisket",
            price: "$49.99",
            weight: "4lb",
            image_url: "https://images.unsplash.com/photo-1524438418049-ab2acb7aa48f?auto=format&fit=crop&q=80",
            farm: "Sunrise Farms",
            description: "Slow-cook to perfection for an unforgettable BBQ experience",
        },
    ]
}

// =============================================================================
// Waitlist view state
// =============================================================================

/// Everything the waitlist section needs to render: current values,
/// per-field errors, the terminal submitted state, and a one-time token.
pub struct WaitlistView {
    /// Posted values, preserved across a failed submission.
    pub form: WaitlistForm,
    /// Per-field validation errors.
    pub errors: FieldErrors,
    /// Terminal state: the form is replaced by a confirmation.
    pub submitted: bool,
    /// Success confirmation or generic failure notice.
    pub notice: Option<String>,
    /// One-time token for the next submission; empty once submitted.
    pub form_token: String,
}

impl WaitlistView {
    /// An empty form ready for input.
    #[must_use]
    pub fn fresh(form_token: String) -> Self {
        Self {
            form: WaitlistForm::default(),
            errors: FieldErrors::new(),
            submitted: false,
            notice: None,
            form_token,
        }
    }

    /// A failed validation: values preserved, errors shown inline.
    #[must_use]
    pub const fn with_errors(form: WaitlistForm, errors: FieldErrors, form_token: String) -> Self {
        Self {
            form,
            errors,
            submitted: false,
            notice: None,
            form_token,
        }
    }

    /// A store-level failure: values preserved, generic notice, retryable.
    #[must_use]
    pub fn failed(form: WaitlistForm, form_token: String) -> Self {
        Self {
            form,
            errors: FieldErrors::new(),
            submitted: false,
            notice: Some("Something went wrong. Please try again.".to_owned()),
            form_token,
        }
    }

    /// The terminal submitted state, confirming the selected role.
    #[must_use]
    pub fn submitted(role: SignupRole) -> Self {
        Self {
            form: WaitlistForm::default(),
            errors: FieldErrors::new(),
            submitted: true,
            notice: Some(format!("You've been added to our waitlist as a {role}.")),
            form_token: String::new(),
        }
    }
}

// =============================================================================
// Template & handler
// =============================================================================

/// Landing page template.
#[derive(Template, WebTemplate)]
#[template(path = "landing.html")]
pub struct LandingTemplate {
    pub benefits: Vec<Benefit>,
    pub steps: Vec<HowItWorksStep>,
    pub testimonials: Vec<Testimonial>,
    pub faqs: Vec<Faq>,
    pub products: Vec<FeaturedProduct>,
    pub waitlist: WaitlistView,
    /// Switches the header between sign-up links and the dashboard link.
    pub signed_in: bool,
}

/// Assemble the landing page around a waitlist view state.
#[must_use]
pub fn landing_page(waitlist: WaitlistView, signed_in: bool) -> LandingTemplate {
    LandingTemplate {
        benefits: benefits(),
        steps: how_it_works(),
        testimonials: testimonials(),
        faqs: faqs(),
        products: featured_products(),
        waitlist,
        signed_in,
    }
}

/// Display the landing page.
pub async fn index(
    OptionalAuth(user): OptionalAuth,
    session: Session,
) -> Result<LandingTemplate, AppError> {
    let form_token = issue_form_token(&session, session_keys::WAITLIST_FORM_TOKEN)
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;

    Ok(landing_page(WaitlistView::fresh(form_token), user.is_some()))
}
