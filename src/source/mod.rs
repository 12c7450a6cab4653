//! Workflow source listings for the code pane
//!
//! Four SDK language variants of the same checkout workflow. Each line carries
//! the activity it corresponds to, if any; the playback engine only consumes
//! two things from here: the index of the line that first uses an activity's
//! result (the replay stop point) and the per-line activity metadata used for
//! selection highlighting. Token coloring lives in [`highlight`] and never
//! affects playback.

pub mod highlight;

use crate::workflow::Activity;
use serde::Serialize;

/// Selectable SDK language variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SdkLanguage {
    TypeScript,
    Go,
    Python,
    Java,
}

impl SdkLanguage {
    /// All variants in tab order
    pub const ALL: [SdkLanguage; 4] = [Self::TypeScript, Self::Go, Self::Python, Self::Java];

    /// Display label for the language tab
    pub fn label(&self) -> &'static str {
        match self {
            Self::TypeScript => "TypeScript",
            Self::Go => "Go",
            Self::Python => "Python",
            Self::Java => "Java",
        }
    }
}

/// Coarse syntactic role of a source line, used only for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    Import,
    Empty,
    Const,
    Type,
    Config,
    Function,
    Await,
    Return,
    Keyword,
    Comment,
    Decorator,
}

/// One line of workflow source with its display metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CodeLine {
    pub text: &'static str,
    pub kind: LineKind,
    /// Activity this line schedules or consumes, if any
    pub activity: Option<Activity>,
}

impl CodeLine {
    const fn plain(text: &'static str, kind: LineKind) -> Self {
        Self {
            text,
            kind,
            activity: None,
        }
    }

    const fn awaits(text: &'static str, activity: Activity) -> Self {
        Self {
            text,
            kind: LineKind::Await,
            activity: Some(activity),
        }
    }
}

/// A complete workflow source listing for one language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SourceListing {
    pub language: SdkLanguage,
    pub filename: &'static str,
    pub lines: &'static [CodeLine],
}

impl SourceListing {
    /// The listing for the given language
    pub fn for_language(language: SdkLanguage) -> &'static SourceListing {
        match language {
            SdkLanguage::TypeScript => &TYPESCRIPT,
            SdkLanguage::Go => &GO,
            SdkLanguage::Python => &PYTHON,
            SdkLanguage::Java => &JAVA,
        }
    }

    /// Index of the first line that references the given activity. During
    /// replay this is the line at which the recorded result is consumed, so
    /// the replay cursor stops there.
    pub fn result_line_index(&self, activity: Activity) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| line.activity == Some(activity))
    }

    /// Line at the given index
    pub fn line(&self, index: usize) -> Option<&CodeLine> {
        self.lines.get(index)
    }

    /// Number of lines in the listing
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the listing is empty
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

use Activity::{ChargeCard, ReserveInventory, ShipOrder};
use LineKind::*;

static TYPESCRIPT: SourceListing = SourceListing {
    language: SdkLanguage::TypeScript,
    filename: "checkout-workflow.ts",
    lines: &[
        CodeLine::plain(
            "import { proxyActivities } from '@temporalio/workflow';",
            Import,
        ),
        CodeLine::plain("", Empty),
        CodeLine::plain(
            "const { chargeCard, reserveInventory, shipOrder } = proxyActivities<{",
            Const,
        ),
        CodeLine::plain(
            "  chargeCard(orderId: string): Promise<{ authId: string }>;",
            Type,
        ),
        CodeLine::plain("  reserveInventory(orderId: string): Promise<void>;", Type),
        CodeLine::plain("  shipOrder(orderId: string): Promise<void>;", Type),
        CodeLine::plain("}>({", Const),
        CodeLine::plain("  startToCloseTimeout: '30 seconds',", Config),
        CodeLine::plain("});", Const),
        CodeLine::plain("", Empty),
        CodeLine::plain(
            "export async function CheckoutWorkflow(orderId: string) {",
            Function,
        ),
        CodeLine::awaits("  const payment = await chargeCard(orderId);", ChargeCard),
        CodeLine::awaits("  await reserveInventory(orderId);", ReserveInventory),
        CodeLine::awaits("  await shipOrder(orderId);", ShipOrder),
        CodeLine::plain(
            "  return { status: 'COMPLETED', authId: payment.authId };",
            Return,
        ),
        CodeLine::plain("}", Function),
    ],
};

static GO: SourceListing = SourceListing {
    language: SdkLanguage::Go,
    filename: "checkout_workflow.go",
    lines: &[
        CodeLine::plain("package workflows", Keyword),
        CodeLine::plain("", Empty),
        CodeLine::plain("import (", Import),
        CodeLine::plain("  \"go.temporal.io/sdk/workflow\"", Import),
        CodeLine::plain(")", Import),
        CodeLine::plain("", Empty),
        CodeLine::plain(
            "func CheckoutWorkflow(ctx workflow.Context, orderID string) error {",
            Function,
        ),
        CodeLine::plain("  opts := workflow.ActivityOptions{", Const),
        CodeLine::plain("    StartToCloseTimeout: 30 * time.Second,", Config),
        CodeLine::plain("  }", Const),
        CodeLine::plain("  ctx = workflow.WithActivityOptions(ctx, opts)", Const),
        CodeLine::plain("", Empty),
        CodeLine::plain("  var payment PaymentResult", Const),
        CodeLine::awaits(
            "  err := workflow.ExecuteActivity(ctx, ChargeCard, orderID).Get(ctx, &payment)",
            ChargeCard,
        ),
        CodeLine::plain("  if err != nil { return err }", Keyword),
        CodeLine::plain("", Empty),
        CodeLine::awaits(
            "  err = workflow.ExecuteActivity(ctx, ReserveInventory, orderID).Get(ctx, nil)",
            ReserveInventory,
        ),
        CodeLine::plain("  if err != nil { return err }", Keyword),
        CodeLine::plain("", Empty),
        CodeLine::awaits(
            "  err = workflow.ExecuteActivity(ctx, ShipOrder, orderID).Get(ctx, nil)",
            ShipOrder,
        ),
        CodeLine::plain("  if err != nil { return err }", Keyword),
        CodeLine::plain("", Empty),
        CodeLine::plain("  return nil", Return),
        CodeLine::plain("}", Function),
    ],
};

static PYTHON: SourceListing = SourceListing {
    language: SdkLanguage::Python,
    filename: "checkout_workflow.py",
    lines: &[
        CodeLine::plain("from datetime import timedelta", Import),
        CodeLine::plain("from temporalio import workflow", Import),
        CodeLine::plain("", Empty),
        CodeLine::plain("# Activity stubs with 30s timeout", Comment),
        CodeLine::plain("@workflow.defn", Decorator),
        CodeLine::plain("class CheckoutWorkflow:", Function),
        CodeLine::plain("", Empty),
        CodeLine::plain("  @workflow.run", Decorator),
        CodeLine::plain("  async def run(self, order_id: str) -> dict:", Function),
        CodeLine::awaits(
            "    payment = await workflow.execute_activity(",
            ChargeCard,
        ),
        CodeLine::plain("      charge_card, order_id,", Config),
        CodeLine::plain("      start_to_close_timeout=timedelta(seconds=30),", Config),
        CodeLine::plain("    )", Const),
        CodeLine::plain("", Empty),
        CodeLine::awaits("    await workflow.execute_activity(", ReserveInventory),
        CodeLine::plain("      reserve_inventory, order_id,", Config),
        CodeLine::plain("      start_to_close_timeout=timedelta(seconds=30),", Config),
        CodeLine::plain("    )", Const),
        CodeLine::plain("", Empty),
        CodeLine::awaits("    await workflow.execute_activity(", ShipOrder),
        CodeLine::plain("      ship_order, order_id,", Config),
        CodeLine::plain("      start_to_close_timeout=timedelta(seconds=30),", Config),
        CodeLine::plain("    )", Const),
        CodeLine::plain("", Empty),
        CodeLine::plain(
            "    return {\"status\": \"COMPLETED\", \"authId\": payment[\"authId\"]}",
            Return,
        ),
    ],
};

static JAVA: SourceListing = SourceListing {
    language: SdkLanguage::Java,
    filename: "CheckoutWorkflow.java",
    lines: &[
        CodeLine::plain("import io.temporal.activity.ActivityOptions;", Import),
        CodeLine::plain("import io.temporal.workflow.Workflow;", Import),
        CodeLine::plain("import java.time.Duration;", Import),
        CodeLine::plain("", Empty),
        CodeLine::plain(
            "public class CheckoutWorkflowImpl implements CheckoutWorkflow {",
            Function,
        ),
        CodeLine::plain("", Empty),
        CodeLine::plain(
            "  private final Activities activities = Workflow.newActivityStub(",
            Const,
        ),
        CodeLine::plain("    Activities.class,", Config),
        CodeLine::plain("    ActivityOptions.newBuilder()", Config),
        CodeLine::plain("      .setStartToCloseTimeout(Duration.ofSeconds(30))", Config),
        CodeLine::plain("      .build());", Config),
        CodeLine::plain("", Empty),
        CodeLine::plain("  @Override", Decorator),
        CodeLine::plain("  public CheckoutResult run(String orderId) {", Function),
        CodeLine::awaits(
            "    PaymentResult payment = activities.chargeCard(orderId);",
            ChargeCard,
        ),
        CodeLine::awaits("    activities.reserveInventory(orderId);", ReserveInventory),
        CodeLine::awaits("    activities.shipOrder(orderId);", ShipOrder),
        CodeLine::plain(
            "    return new CheckoutResult(\"COMPLETED\", payment.getAuthId());",
            Return,
        ),
        CodeLine::plain("  }", Function),
        CodeLine::plain("}", Function),
    ],
};
