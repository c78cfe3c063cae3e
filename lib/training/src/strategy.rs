use serde::Serialize;
use std::fmt;

/// Base model the example commands fine-tune
pub const DEFAULT_BASE_MODEL: &str = "llava-hf/llava-1.5-7b-hf";

/// Weight quantization used while training
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Quantization {
    None,
    EightBit,
    FourBit {
        compute_dtype: &'static str,
        quant_type: &'static str,
        nested: bool,
    },
}

impl Quantization {
    fn flag(&self) -> &'static str {
        match self {
            Quantization::None => "--no_quantization",
            Quantization::EightBit => "--use_8bit",
            Quantization::FourBit { .. } => "--use_4bit",
        }
    }
}

/// One LoRA hyperparameter set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoraStrategy {
    pub name: &'static str,
    pub summary: &'static str,
    pub quantization: Quantization,
    pub per_device_train_batch_size: u32,
    pub gradient_accumulation_steps: u32,
    pub max_seq_length: u32,
    pub bf16: bool,
    pub fp16: bool,
    pub lora_r: u32,
    pub lora_alpha: u32,
    pub lora_dropout: f64,
    pub learning_rate: f64,
    /// Expected VRAM use in GB, low and high
    pub estimated_vram_gb: (u32, u32),
}

/// No quantization, full bf16: fastest and best quality
pub const MAX_SPEED: LoraStrategy = LoraStrategy {
    name: "max_speed",
    summary: "No quantization, full bf16, large batch",
    quantization: Quantization::None,
    per_device_train_batch_size: 8,
    gradient_accumulation_steps: 2,
    max_seq_length: 2048,
    bf16: true,
    fp16: false,
    lora_r: 32,
    lora_alpha: 64,
    lora_dropout: 0.05,
    learning_rate: 3e-4,
    estimated_vram_gb: (20, 22),
};

pub const BALANCED: LoraStrategy = LoraStrategy {
    name: "balanced",
    summary: "8-bit quantization with a larger batch",
    quantization: Quantization::EightBit,
    per_device_train_batch_size: 12,
    gradient_accumulation_steps: 2,
    max_seq_length: 2048,
    bf16: true,
    fp16: false,
    lora_r: 32,
    lora_alpha: 64,
    lora_dropout: 0.05,
    learning_rate: 3e-4,
    estimated_vram_gb: (15, 18),
};

pub const MEMORY_EFFICIENT: LoraStrategy = LoraStrategy {
    name: "memory_efficient",
    summary: "4-bit NF4 quantization, batch as large as 4-bit allows",
    quantization: Quantization::FourBit {
        compute_dtype: "bfloat16",
        quant_type: "nf4",
        nested: true,
    },
    per_device_train_batch_size: 16,
    gradient_accumulation_steps: 1,
    max_seq_length: 2048,
    bf16: true,
    fp16: false,
    lora_r: 16,
    lora_alpha: 32,
    lora_dropout: 0.05,
    learning_rate: 2e-4,
    estimated_vram_gb: (10, 12),
};

/// 4-bit with doubled sequence length
pub const LONG_CONTEXT: LoraStrategy = LoraStrategy {
    name: "long_context",
    summary: "4-bit NF4 quantization with 4096-token sequences",
    quantization: Quantization::FourBit {
        compute_dtype: "bfloat16",
        quant_type: "nf4",
        nested: true,
    },
    per_device_train_batch_size: 8,
    gradient_accumulation_steps: 2,
    max_seq_length: 4096,
    bf16: true,
    fp16: false,
    lora_r: 16,
    lora_alpha: 32,
    lora_dropout: 0.05,
    learning_rate: 2e-4,
    estimated_vram_gb: (18, 20),
};

/// Start here; fall back to BALANCED on OOM, LONG_CONTEXT for long sequences
pub const RECOMMENDED: LoraStrategy = MAX_SPEED;

/// Trainer settings that apply on top of any strategy
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdditionalOptimizations {
    pub gradient_checkpointing: bool,
    pub tf32: bool,
    pub dataloader_num_workers: u32,
    pub dataloader_pin_memory: bool,
    pub optim: &'static str,
    pub torch_compile: bool,
    pub logging_steps: u32,
    pub logging_first_step: bool,
}

pub const ADDITIONAL_OPTIMIZATIONS: AdditionalOptimizations = AdditionalOptimizations {
    gradient_checkpointing: false,
    tf32: true,
    dataloader_num_workers: 4,
    dataloader_pin_memory: true,
    optim: "adamw_torch_fused",
    torch_compile: false,
    logging_steps: 5,
    logging_first_step: true,
};

static STRATEGIES: [&LoraStrategy; 4] = [&MAX_SPEED, &BALANCED, &MEMORY_EFFICIENT, &LONG_CONTEXT];

pub fn all() -> &'static [&'static LoraStrategy] {
    &STRATEGIES
}

/// Find a strategy by name; case and `-`/`_` are ignored, `recommended` is accepted
pub fn by_name(name: &str) -> Option<&'static LoraStrategy> {
    let wanted = name.trim().to_ascii_lowercase().replace('-', "_");
    if wanted == "recommended" {
        return Some(&RECOMMENDED);
    }
    STRATEGIES.iter().copied().find(|s| s.name == wanted)
}

impl LoraStrategy {
    pub fn effective_batch_size(&self) -> u32 {
        self.per_device_train_batch_size * self.gradient_accumulation_steps
    }

    /// `train_lora.py` invocation for this strategy
    pub fn train_command(&self, model: &str, num_epochs: u32) -> String {
        let mut args = vec![
            format!("--model_name {}", model),
            format!("--batch_size {}", self.per_device_train_batch_size),
            format!("--learning_rate {:e}", self.learning_rate),
            format!("--lora_r {}", self.lora_r),
            format!("--lora_alpha {}", self.lora_alpha),
        ];
        if self.max_seq_length != 2048 {
            args.push(format!("--max_seq_length {}", self.max_seq_length));
        }
        args.push(format!("--num_epochs {}", num_epochs));
        args.push(self.quantization.flag().to_string());
        if self.bf16 {
            args.push("--bf16".to_string());
        } else if self.fp16 {
            args.push("--fp16".to_string());
        }

        let mut command = String::from("python train_lora.py");
        for arg in args {
            command.push_str(" \\\n    ");
            command.push_str(&arg);
        }
        command
    }
}

impl fmt::Display for LoraStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Strategy: {} ({})", self.name, self.summary)?;
        match self.quantization {
            Quantization::None => writeln!(f, "  quantization: none")?,
            Quantization::EightBit => writeln!(f, "  quantization: 8-bit")?,
            Quantization::FourBit { compute_dtype, quant_type, nested } => {
                writeln!(f, "  quantization: 4-bit")?;
                writeln!(f, "  bnb_4bit_compute_dtype: {}", compute_dtype)?;
                writeln!(f, "  bnb_4bit_quant_type: {}", quant_type)?;
                writeln!(f, "  use_nested_quant: {}", nested)?;
            }
        }
        writeln!(f, "  per_device_train_batch_size: {}", self.per_device_train_batch_size)?;
        writeln!(f, "  gradient_accumulation_steps: {}", self.gradient_accumulation_steps)?;
        writeln!(f, "  effective_batch_size: {}", self.effective_batch_size())?;
        writeln!(f, "  max_seq_length: {}", self.max_seq_length)?;
        writeln!(f, "  bf16: {}", self.bf16)?;
        writeln!(f, "  fp16: {}", self.fp16)?;
        writeln!(f, "  lora_r: {}", self.lora_r)?;
        writeln!(f, "  lora_alpha: {}", self.lora_alpha)?;
        writeln!(f, "  lora_dropout: {}", self.lora_dropout)?;
        writeln!(f, "  learning_rate: {:e}", self.learning_rate)?;
        write!(
            f,
            "  estimated_vram: {}-{} GB",
            self.estimated_vram_gb.0, self.estimated_vram_gb.1
        )
    }
}

impl fmt::Display for AdditionalOptimizations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  gradient_checkpointing: {}", self.gradient_checkpointing)?;
        writeln!(f, "  tf32: {}", self.tf32)?;
        writeln!(f, "  dataloader_num_workers: {}", self.dataloader_num_workers)?;
        writeln!(f, "  dataloader_pin_memory: {}", self.dataloader_pin_memory)?;
        writeln!(f, "  optim: {}", self.optim)?;
        writeln!(f, "  torch_compile: {}", self.torch_compile)?;
        writeln!(f, "  logging_steps: {}", self.logging_steps)?;
        write!(f, "  logging_first_step: {}", self.logging_first_step)
    }
}
